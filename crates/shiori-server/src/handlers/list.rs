use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use shiori_api::CatalogGateway;
use shiori_core::list::ListReport;
use shiori_core::models::StatusLabel;

use crate::error::AppError;
use crate::extract::{ApiJson, ApiPath, Caller};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub item_id: u64,
    pub status: StatusLabel,
}

pub async fn enumerate<G: CatalogGateway + 'static>(
    State(state): State<AppState<G>>,
    caller: Caller,
) -> Result<Json<ListReport>, AppError> {
    let report = state.lists.enumerate(caller.token()).await?;
    Ok(Json(report))
}

pub async fn set_status<G: CatalogGateway + 'static>(
    State(state): State<AppState<G>>,
    caller: Caller,
    ApiPath(item_id): ApiPath<u64>,
    ApiJson(req): ApiJson<StatusRequest>,
) -> Result<Json<StatusResponse>, AppError> {
    let status = state
        .lists
        .add_or_update(caller.token(), item_id, &req.status)?;
    Ok(Json(StatusResponse { item_id, status }))
}
