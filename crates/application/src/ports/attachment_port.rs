//! Attachment port - Interface for downloading attachment content

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use domain::{Attachment, InboundMessage};
use futures::Stream;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Attachment body as it arrives from the channel
pub type AudioStream = Pin<Box<dyn Stream<Item = Result<Bytes, ApplicationError>> + Send>>;

/// Port for fetching attachment bytes referenced by a message
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AttachmentPort: Send + Sync {
    /// Start downloading `attachment`
    ///
    /// The message decides how the request is authorized.
    async fn fetch(
        &self,
        message: &InboundMessage,
        attachment: &Attachment,
    ) -> Result<AudioStream, ApplicationError>;
}
