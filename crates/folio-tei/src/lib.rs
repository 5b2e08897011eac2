//! folio-tei - TEI document rendering and patching for the corpus.
//!
//! The pipeline loads one [`store::RecordStore`] snapshot per run, renders
//! each series into a header ([`header`]) and a body ([`surface`]), and
//! writes or patches documents ([`document`]). The motif-update pathway only
//! exercises the taxonomy encoder ([`taxonomy`]) and the patcher.

pub mod document;
pub mod header;
pub mod pipeline;
pub mod store;
pub mod surface;
pub mod taxonomy;

use folio_core::defaults;

pub use pipeline::SeriesSelection;
pub use store::RecordStore;

/// Rendering configuration shared by the header and surface assemblers.
#[derive(Debug, Clone)]
pub struct TeiContext {
    /// Prefix prepended to record URIs in `sameAs` attributes.
    pub uri_prefix: String,
    /// Base URL joined with per-image paths to form graphic URLs.
    pub iiif_base: String,
}

impl Default for TeiContext {
    fn default() -> Self {
        Self {
            uri_prefix: defaults::URI_PREFIX.to_string(),
            iiif_base: defaults::IIIF_BASE.to_string(),
        }
    }
}

impl TeiContext {
    /// Create from environment variables (with defaults).
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `FOLIO_URI_PREFIX` | compiled-in corpus URL |
    /// | `FOLIO_IIIF_BASE` | compiled-in IIIF service URL |
    pub fn from_env() -> Self {
        let uri_prefix =
            std::env::var("FOLIO_URI_PREFIX").unwrap_or_else(|_| defaults::URI_PREFIX.to_string());
        let iiif_base =
            std::env::var("FOLIO_IIIF_BASE").unwrap_or_else(|_| defaults::IIIF_BASE.to_string());

        Self {
            uri_prefix,
            iiif_base,
        }
    }
}
