//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Attachment reference cannot be downloaded
    #[error("Invalid attachment: {0}")]
    InvalidAttachment(String),

    /// Conversation address is incomplete
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
