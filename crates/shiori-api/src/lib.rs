//! Read-only client for the anime catalog backing shiori.
//!
//! The rest of the workspace talks to the catalog through
//! [`CatalogGateway`]; [`jikan::JikanClient`] is the production
//! implementation.

pub mod jikan;
pub mod traits;

pub use traits::{CatalogDetail, CatalogGateway, CatalogPage, CatalogSummary};
