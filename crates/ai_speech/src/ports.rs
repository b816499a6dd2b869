//! Provider-facing speech traits
//!
//! The application layer never sees these directly; the infrastructure
//! speech adapter wraps a provider and exposes the application's port.

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, Transcription};

/// Recognizes speech in a complete audio clip
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Recognize the clip and return the best hypothesis
    ///
    /// A clip in which nothing was recognized is an error
    /// (`SpeechError::NoMatch`), not an empty transcription.
    async fn transcribe(&self, audio: AudioData) -> Result<Transcription, SpeechError>;

    /// Whether the service accepts the configured credentials
    async fn is_available(&self) -> bool;

    /// Recognition language sent with every request
    fn language(&self) -> &str;
}

/// Renders text as speech
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Synthesize `text` with `voice`, or the provider's default voice
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<AudioData, SpeechError>;

    /// Whether the service accepts the configured credentials
    async fn is_available(&self) -> bool;

    fn default_voice(&self) -> &str;
}
