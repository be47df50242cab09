//! In-memory catalog used by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use shiori_api::{CatalogDetail, CatalogGateway, CatalogPage, CatalogSummary};

#[derive(Debug, thiserror::Error)]
pub enum FakeError {
    #[error("catalog offline")]
    Offline,
    #[error("item {0} not found")]
    NotFound(u64),
}

#[derive(Default)]
pub struct FakeCatalog {
    pub pages: HashMap<u32, Vec<CatalogSummary>>,
    pub items: HashMap<u64, CatalogDetail>,
    pub failing: HashSet<u64>,
    pub offline: bool,
    pub item_calls: Mutex<Vec<u64>>,
}

impl FakeCatalog {
    pub fn with_items(ids: &[u64]) -> Self {
        let mut catalog = Self::default();
        for &id in ids {
            catalog.items.insert(id, detail(id, &format!("Anime {id}")));
        }
        catalog
    }

    pub fn fail_on(mut self, id: u64) -> Self {
        self.failing.insert(id);
        self
    }
}

pub fn detail(item_id: u64, title: &str) -> CatalogDetail {
    CatalogDetail {
        item_id,
        title: title.to_string(),
        image_url: Some(format!("https://img.example/{item_id}.jpg")),
        synopsis: "No synopsis available".into(),
        episodes: Some(12),
        trailer_url: None,
    }
}

pub fn summary(item_id: u64, title: &str) -> CatalogSummary {
    detail(item_id, title).summary()
}

impl CatalogGateway for FakeCatalog {
    type Error = FakeError;

    async fn fetch_page(&self, page: u32) -> Result<CatalogPage, FakeError> {
        if self.offline {
            return Err(FakeError::Offline);
        }
        let items = self.pages.get(&page).cloned().unwrap_or_default();
        let has_next = page.checked_add(1).is_some_and(|next| self.pages.contains_key(&next));
        Ok(CatalogPage { items, has_next })
    }

    async fn fetch_item(&self, item_id: u64) -> Result<CatalogDetail, FakeError> {
        self.item_calls.lock().unwrap().push(item_id);
        if self.offline || self.failing.contains(&item_id) {
            return Err(FakeError::Offline);
        }
        self.items
            .get(&item_id)
            .cloned()
            .ok_or(FakeError::NotFound(item_id))
    }
}
