//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer on top of the Azure
//! speech provider and the Bot Framework connector, and loads configuration.

pub mod adapters;
pub mod config;

pub use adapters::*;
pub use config::{AppConfig, ConnectorAppConfig, ServerConfig, TurnAppConfig};
