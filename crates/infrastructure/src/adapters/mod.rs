//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod botframework_adapter;
mod speech_adapter;

pub use botframework_adapter::BotFrameworkAdapter;
pub use speech_adapter::SpeechAdapter;
