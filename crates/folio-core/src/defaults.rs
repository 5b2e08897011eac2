//! Compiled-in defaults for folio.
//!
//! Every value here can be overridden by an environment variable or a CLI
//! flag; these are the fallbacks when neither is present.

/// Base URL of the corpus REST API.
pub const API_BASE: &str = "https://corpora.dh.tamu.edu/api/corpus/6285564874d5f7a229b60520";

/// Base URL of the IIIF image service, joined with per-image paths.
pub const IIIF_BASE: &str = "https://corpora.dh.tamu.edu/iiif/2";

/// Prefix prepended to record URIs in `sameAs` attributes.
pub const URI_PREFIX: &str = "https://corpora.dh.tamu.edu";

/// Directory scanned for existing TEI documents.
pub const INPUT_DIR: &str = "data/for_processing";

/// Directory generated and patched documents are written to.
pub const OUTPUT_DIR: &str = "data/processing_output";

/// Per-request timeout for API fetches (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 60;
