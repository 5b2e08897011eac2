//! Wire record models for the corpus API.
//!
//! All entities are flat records identified by a stable URI, globally unique
//! within their type. Relationships between records are embedded [`Ref`]
//! objects; the full record is resolved by looking the URI up in the matching
//! collection. Records are read-only snapshots for the duration of one run.

use serde::{Deserialize, Serialize};

/// Embedded reference to another record: `{uri, label}`.
///
/// Some embedding sites (a series' agent list) only carry the URI, so the
/// label defaults to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ref {
    pub uri: String,
    #[serde(default)]
    pub label: String,
}

/// One logical print/manuscript work. Produces exactly one output document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Series {
    pub uri: String,
    pub title: String,
    /// References into the Agent collection.
    #[serde(default)]
    pub agents: Vec<Ref>,
    pub city_of_production: Option<Ref>,
    /// Free-text production date, emitted verbatim.
    pub date_label: Option<String>,
    #[serde(default)]
    pub media: Vec<Ref>,
    #[serde(default)]
    pub school: Vec<Ref>,
    #[serde(default)]
    pub themes: Vec<Ref>,
}

/// Links a person to a role for a given series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub uri: String,
    pub person: Ref,
    pub role: Ref,
}

/// A person record, optionally carrying an external authority URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub uri: String,
    pub label: String,
    pub authoritative_uri: Option<String>,
}

impl Person {
    /// The authority URI to attach as a `ref` attribute, if any.
    ///
    /// A URI that encodes a role qualification (contains `role=`) identifies
    /// the person-in-role rather than the person, so it is excluded.
    pub fn external_ref(&self) -> Option<&str> {
        self.authoritative_uri
            .as_deref()
            .filter(|uri| !uri.contains("role="))
    }
}

/// Institutional custody record for a physical copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holding {
    pub uri: String,
    pub institution: Ref,
    pub url: String,
    pub identifier: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub uri: String,
    pub iso_code: String,
    pub label: String,
}

/// One page/surface within a series, as returned by the summary listing.
///
/// The image-service location is not part of the summary; it comes from the
/// per-image [`ImageDetail`] fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub uri: String,
    pub series: Ref,
    pub seq_no: i64,
    pub label: String,
    /// Corpus-internal identifier used for the detail endpoint.
    pub id: String,
    pub transcription: Option<String>,
    pub translation: Option<String>,
    #[serde(default)]
    pub holdings: Vec<Ref>,
    #[serde(default)]
    pub languages: Vec<Ref>,
}

/// Per-image detail record carrying the image-service location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageDetail {
    pub image: Option<ImageFile>,
    pub external_iiif_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageFile {
    pub path: String,
}

impl ImageDetail {
    /// Resolve the graphic URL: an external IIIF URL wins over the local
    /// image-service path; neither present means no URL.
    pub fn resolved_url(&self, iiif_base: &str) -> Option<String> {
        if let Some(url) = &self.external_iiif_url {
            return Some(url.clone());
        }
        self.image
            .as_ref()
            .map(|img| format!("{}{}", iiif_base, img.path))
    }
}

/// Taxonomy node. Motifs form a forest: a node with no `parent` is a root;
/// a node is a leaf iff no other motif names it as parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Motif {
    pub id: String,
    pub uri: String,
    pub label: String,
    pub name: String,
    pub parent: Option<Ref>,
}
