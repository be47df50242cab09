//! HTTP boundary for shiori.
//!
//! Every error raised below the handlers is turned into a JSON notice here;
//! nothing a caller sends can take the process down.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;
pub mod telemetry;

pub use router::build_router;
pub use state::AppState;
