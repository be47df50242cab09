//! Router construction.

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use shiori_api::CatalogGateway;

use crate::handlers;
use crate::state::AppState;

/// Build the full router. Authentication is per-handler: every route accepts
/// anonymous callers and decides for itself what they may do.
pub fn build_router<G: CatalogGateway + 'static>(state: AppState<G>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/anime", get(handlers::catalog::browse::<G>))
        .route("/anime/:id", get(handlers::catalog::detail::<G>))
        .route("/signup", post(handlers::account::signup::<G>))
        .route("/login", post(handlers::account::login::<G>))
        .route("/logout", post(handlers::account::logout::<G>))
        .route("/me", get(handlers::account::me::<G>))
        .route("/list", get(handlers::list::enumerate::<G>))
        .route("/list/:id", put(handlers::list::set_status::<G>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
