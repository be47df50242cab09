//! Trait definitions for the anime catalog.
//!
//! The catalog is consulted for browsing and to enrich a user's list with
//! display metadata. Tests swap in fakes by implementing [`CatalogGateway`].

use std::future::Future;

/// A read-only anime catalog.
pub trait CatalogGateway: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetch one page of the catalog's top-anime listing (1-based).
    fn fetch_page(
        &self,
        page: u32,
    ) -> impl Future<Output = Result<CatalogPage, Self::Error>> + Send;

    /// Fetch the full record for a single catalog item.
    fn fetch_item(
        &self,
        item_id: u64,
    ) -> impl Future<Output = Result<CatalogDetail, Self::Error>> + Send;
}

/// Compact catalog record used in listings.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogSummary {
    pub item_id: u64,
    pub title: String,
    pub image_url: Option<String>,
}

/// One page of catalog listings.
#[derive(Debug, Clone)]
pub struct CatalogPage {
    pub items: Vec<CatalogSummary>,
    pub has_next: bool,
}

/// Full catalog record for the detail view.
///
/// `synopsis` is already cleaned of upstream boilerplate and `trailer_url`
/// is already in embeddable form.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CatalogDetail {
    pub item_id: u64,
    pub title: String,
    pub image_url: Option<String>,
    pub synopsis: String,
    /// `None` when the episode count is not known yet.
    pub episodes: Option<u32>,
    pub trailer_url: Option<String>,
}

impl CatalogDetail {
    /// The listing view of this record.
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            item_id: self.item_id,
            title: self.title.clone(),
            image_url: self.image_url.clone(),
        }
    }
}
