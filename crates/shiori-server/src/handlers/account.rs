use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use shiori_api::CatalogGateway;

use crate::error::AppError;
use crate::extract::{ApiJson, Caller};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub display_name: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

pub async fn signup<G: CatalogGateway + 'static>(
    State(state): State<AppState<G>>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<ProfileResponse>), AppError> {
    let email = req.email.trim();
    let display_name = req.display_name.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("a valid email is required".into()));
    }
    if display_name.is_empty() {
        return Err(AppError::BadRequest("display name must not be empty".into()));
    }
    if req.password.is_empty() {
        return Err(AppError::BadRequest("password must not be empty".into()));
    }

    state.accounts.register(email, display_name, &req.password)?;
    Ok((
        StatusCode::CREATED,
        Json(ProfileResponse {
            email: email.to_string(),
            display_name: display_name.to_string(),
        }),
    ))
}

/// Verify credentials and issue a fresh session token.
///
/// A token presented alongside the request is cleared first, so the caller
/// never ends up with two live sessions from one login.
pub async fn login<G: CatalogGateway + 'static>(
    State(state): State<AppState<G>>,
    caller: Caller,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let account = state.accounts.verify(req.email.trim(), &req.password)?;

    if let Some(previous) = caller.token() {
        state.sessions.clear(previous);
    }
    let token = state.sessions.login(&account);
    tracing::info!(active = state.sessions.active_sessions(), "login");

    Ok(Json(LoginResponse {
        token: token.to_string(),
        display_name: account.display_name,
    }))
}

pub async fn logout<G: CatalogGateway + 'static>(
    State(state): State<AppState<G>>,
    caller: Caller,
) -> StatusCode {
    if let Some(token) = caller.token() {
        state.sessions.logout(token);
    }
    StatusCode::NO_CONTENT
}

pub async fn me<G: CatalogGateway + 'static>(
    State(state): State<AppState<G>>,
    caller: Caller,
) -> Json<MeResponse> {
    let display_name = caller
        .token()
        .map(|token| state.sessions.current_identity(token))
        .and_then(|identity| identity.display_name().map(str::to_string));
    Json(MeResponse {
        authenticated: display_name.is_some(),
        display_name,
    })
}
