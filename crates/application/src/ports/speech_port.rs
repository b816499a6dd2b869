//! Speech port - Interface for speech-to-text and text-to-speech operations

use async_trait::async_trait;
use domain::AudioFormat;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::ports::AudioStream;

/// Result of a transcription operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionResult {
    /// Transcribed text
    pub text: String,
    /// Recognition language (e.g., "en-US")
    pub language: Option<String>,
    /// Duration of recognized speech in milliseconds
    pub duration_ms: Option<u64>,
}

impl TranscriptionResult {
    /// Create a result with only text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: None,
            duration_ms: None,
        }
    }
}

/// Result of a speech synthesis operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisResult {
    /// Generated audio data
    pub audio_data: Vec<u8>,
    /// Format of the audio
    pub format: AudioFormat,
}

/// Port for speech processing operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Transcribe streamed audio to text (Speech-to-Text)
    ///
    /// # Arguments
    /// * `audio` - Audio bytes as they arrive from the channel
    /// * `format` - Format of the audio
    async fn transcribe(
        &self,
        audio: AudioStream,
        format: AudioFormat,
    ) -> Result<TranscriptionResult, ApplicationError>;

    /// Synthesize speech from text (Text-to-Speech)
    async fn synthesize(&self, text: String) -> Result<SynthesisResult, ApplicationError>;

    /// Check if the speech service is available
    async fn is_available(&self) -> bool;
}
