//! Domain layer for SpeechRelay
//!
//! Contains the turn data model (inbound messages, attachment references,
//! replies), value objects, the text analyzer, and domain errors.
//! This layer has no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod text_stats;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use text_stats::{TextStats, analyze};
pub use value_objects::*;
