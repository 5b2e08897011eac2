//! Source traits decoupling the renderers from the network.
//!
//! The HTTP client implements these against the paginated corpus API;
//! tests substitute in-memory stubs.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Agent, Holding, Image, ImageDetail, Language, Motif, Person, Series};

/// Provider of complete record collections, one method per record type.
///
/// Each call returns the full collection in server order; pagination is an
/// implementation detail of the source.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn series(&self) -> Result<Vec<Series>>;
    async fn agents(&self) -> Result<Vec<Agent>>;
    async fn people(&self) -> Result<Vec<Person>>;
    async fn holdings(&self) -> Result<Vec<Holding>>;
    async fn languages(&self) -> Result<Vec<Language>>;
    async fn images(&self) -> Result<Vec<Image>>;
    async fn motifs(&self) -> Result<Vec<Motif>>;
}

/// Provider of per-image detail records.
#[async_trait]
pub trait ImageDetailSource: Send + Sync {
    /// Fetch the detail record for one image by its corpus identifier.
    async fn image_detail(&self, id: &str) -> Result<ImageDetail>;
}
