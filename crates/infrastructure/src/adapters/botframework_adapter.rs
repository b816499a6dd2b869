//! Bot Framework adapter
//!
//! Implements `AttachmentPort` and `ReplyPort` using the Bot Framework
//! integration crate.

use application::error::ApplicationError;
use application::ports::{AttachmentPort, AudioStream, ReplyPort};
use async_trait::async_trait;
use domain::{Attachment, ConversationAddress, InboundMessage, Reply};
use futures::StreamExt;
use integration_botframework::{
    AttachmentFetcher, ConnectorClient, ConnectorConfig, ConnectorError,
};
use tracing::{debug, instrument};

/// Adapter that talks to the channel through the Bot Framework connector
#[derive(Clone)]
pub struct BotFrameworkAdapter {
    connector: ConnectorClient,
    fetcher: AttachmentFetcher,
}

impl BotFrameworkAdapter {
    /// Create a new Bot Framework adapter
    ///
    /// # Errors
    /// Returns an error if the connector configuration is invalid.
    pub fn new(config: ConnectorConfig) -> Result<Self, ConnectorError> {
        let connector = ConnectorClient::new(config)?;
        Ok(Self {
            fetcher: AttachmentFetcher::new(connector.clone()),
            connector,
        })
    }

    /// Get a reference to the underlying connector client
    #[must_use]
    pub const fn connector(&self) -> &ConnectorClient {
        &self.connector
    }
}

impl std::fmt::Debug for BotFrameworkAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotFrameworkAdapter")
            .field("has_credentials", &self.connector.has_credentials())
            .finish_non_exhaustive()
    }
}

fn fetch_error(err: ConnectorError) -> ApplicationError {
    ApplicationError::AttachmentFetch(err.to_string())
}

fn delivery_error(err: ConnectorError) -> ApplicationError {
    match err {
        ConnectorError::Configuration(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ReplyDelivery(other.to_string()),
    }
}

#[async_trait]
impl AttachmentPort for BotFrameworkAdapter {
    #[instrument(skip(self, message, attachment), fields(source = %message.source))]
    async fn fetch(
        &self,
        message: &InboundMessage,
        attachment: &Attachment,
    ) -> Result<AudioStream, ApplicationError> {
        let stream = self
            .fetcher
            .fetch(message, attachment)
            .await
            .map_err(fetch_error)?;

        Ok(Box::pin(stream.map(|chunk| chunk.map_err(fetch_error))))
    }
}

#[async_trait]
impl ReplyPort for BotFrameworkAdapter {
    #[instrument(skip(self, address, reply), fields(conversation = %address.conversation_id))]
    async fn reply(
        &self,
        address: &ConversationAddress,
        reply: Reply,
    ) -> Result<(), ApplicationError> {
        let response = self
            .connector
            .reply_to_activity(address, &reply)
            .await
            .map_err(delivery_error)?;

        debug!(activity_id = ?response.id, "Reply delivered");
        Ok(())
    }

    #[instrument(skip(self, address, reply), fields(conversation = %address.conversation_id))]
    async fn send(
        &self,
        address: &ConversationAddress,
        reply: Reply,
    ) -> Result<(), ApplicationError> {
        let response = self
            .connector
            .send_to_conversation(address, &reply)
            .await
            .map_err(delivery_error)?;

        debug!(activity_id = ?response.id, "Message delivered");
        Ok(())
    }
}
