//! Route handlers.
//!
//! GET  /health         : liveness
//! GET  /anime          : browse a catalog page (`?page=&query=`)
//! GET  /anime/:id      : item detail, plus the caller's label
//! POST /signup         : register an account
//! POST /login          : exchange credentials for a session token
//! POST /logout         : drop the caller's session
//! GET  /me             : who the caller is
//! GET  /list           : the caller's labelled items
//! PUT  /list/:id       : label an item

pub mod account;
pub mod catalog;
pub mod list;

use axum::Json;

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
