//! Catalog data: categories and the videos they contain.
//!
//! The catalog is read once at startup from a JSON file and is immutable for
//! the rest of the session. Everything else in the crate borrows from it.
//!
//! # Module Structure
//!
//! - `types` - `Category`, `Video`, `CatalogSection`, `Catalog`
//! - `loader` - JSON loading and integrity checks
//! - `media_url` - media URL normalization

mod loader;
mod media_url;
pub(crate) mod types;

pub use loader::CatalogError;
pub use media_url::normalize_media_url;
pub use types::{Catalog, CatalogSection, Category, Video};
