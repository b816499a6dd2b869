//! Application layer - Use cases and orchestration
//!
//! Contains the turn workflow of the bot and the ports it drives.
//! Adapters in the infrastructure layer implement the ports.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
