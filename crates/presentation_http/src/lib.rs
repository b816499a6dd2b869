//! SpeechRelay HTTP presentation layer
//!
//! This crate provides the Bot Framework messaging endpoint and health
//! probes.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use middleware::RequestIdLayer;
pub use routes::create_router;
pub use server::{ShutdownOutcome, serve};
pub use state::AppState;
