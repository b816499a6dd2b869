//! Application-level errors

use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Speech service error
    #[error("Speech service error: {0}")]
    Speech(String),

    /// Attachment could not be downloaded
    #[error("Attachment fetch failed: {0}")]
    AttachmentFetch(String),

    /// Reply could not be delivered to the channel
    #[error("Reply delivery failed: {0}")]
    ReplyDelivery(String),

    /// Audio exceeds the accepted size
    #[error("Audio too large: {size_bytes} bytes (max {max_bytes})")]
    AudioTooLarge { size_bytes: usize, max_bytes: usize },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Whether the error happened while turning the user's audio into text
    ///
    /// These are answered in the conversation instead of failing the turn.
    pub const fn is_transcription_failure(&self) -> bool {
        matches!(
            self,
            Self::Speech(_) | Self::AttachmentFetch(_) | Self::AudioTooLarge { .. }
        )
    }
}
