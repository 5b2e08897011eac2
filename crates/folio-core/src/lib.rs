//! folio-core - Core types, traits, and abstractions for folio.
//!
//! Folio renders a digitized print/manuscript corpus as TEI XML documents.
//! This crate holds everything the other crates share: the wire record
//! models, the error type, the source traits that decouple rendering from
//! the network, and small utilities (filename derivation, XML writing,
//! compiled-in defaults).

pub mod defaults;
pub mod error;
pub mod filename;
pub mod models;
pub mod traits;
pub mod xml;

pub use error::{Error, Result};
pub use filename::filename_from_title;
pub use models::{
    Agent, Holding, Image, ImageDetail, ImageFile, Language, Motif, Person, Ref, Series,
};
pub use traits::{ImageDetailSource, RecordSource};
