use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use shiori_api::{CatalogDetail, CatalogGateway};
use shiori_core::browse::{self, BrowsePage};
use shiori_core::models::StatusLabel;

use crate::error::AppError;
use crate::extract::{ApiPath, Caller};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BrowseParams {
    /// Kept as text: anything that is not a page number means page 1.
    pub page: Option<String>,
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailResponse {
    #[serde(flatten)]
    pub anime: CatalogDetail,
    /// The caller's label; absent when anonymous or unlabelled.
    pub status: Option<StatusLabel>,
}

pub async fn browse<G: CatalogGateway + 'static>(
    State(state): State<AppState<G>>,
    Query(params): Query<BrowseParams>,
) -> Result<Json<BrowsePage>, AppError> {
    let page = params
        .page
        .as_deref()
        .and_then(|p| p.trim().parse::<u32>().ok())
        .unwrap_or(1);
    let query = params.query.unwrap_or_default();

    let page = browse::browse(state.catalog.as_ref(), page, &query).await?;
    Ok(Json(page))
}

pub async fn detail<G: CatalogGateway + 'static>(
    State(state): State<AppState<G>>,
    caller: Caller,
    ApiPath(item_id): ApiPath<u64>,
) -> Result<Json<DetailResponse>, AppError> {
    let anime = browse::detail(state.catalog.as_ref(), item_id).await?;
    let status = state.lists.status_for(caller.token(), item_id)?;
    Ok(Json(DetailResponse { anime, status }))
}
