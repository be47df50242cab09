use serde::Serialize;

use shiori_api::{CatalogDetail, CatalogGateway, CatalogSummary};

use crate::error::ShioriError;

/// One filtered, sorted page of the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct BrowsePage {
    pub page: u32,
    pub query: String,
    pub items: Vec<CatalogSummary>,
    pub next_page: Option<u32>,
    pub prev_page: Option<u32>,
}

/// Fetch `page` (1-based, clamped) and keep titles containing `query`.
///
/// Matching is a case-insensitive substring test; an empty query keeps
/// everything. Results are sorted by title.
pub async fn browse<G: CatalogGateway>(
    catalog: &G,
    page: u32,
    query: &str,
) -> Result<BrowsePage, ShioriError> {
    let page = page.max(1);
    let fetched = catalog
        .fetch_page(page)
        .await
        .map_err(ShioriError::upstream)?;

    let mut items = filter_titles(fetched.items, query);
    items.sort_by(|a, b| a.title.cmp(&b.title));

    Ok(BrowsePage {
        page,
        query: query.to_string(),
        items,
        next_page: page.checked_add(1).filter(|_| fetched.has_next),
        prev_page: (page > 1).then(|| page - 1),
    })
}

/// Fetch the cleaned detail record for one item.
pub async fn detail<G: CatalogGateway>(
    catalog: &G,
    item_id: u64,
) -> Result<CatalogDetail, ShioriError> {
    catalog
        .fetch_item(item_id)
        .await
        .map_err(ShioriError::upstream)
}

fn filter_titles(items: Vec<CatalogSummary>, query: &str) -> Vec<CatalogSummary> {
    let needle = query.to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.title.to_lowercase().contains(&needle))
        .collect()
}
