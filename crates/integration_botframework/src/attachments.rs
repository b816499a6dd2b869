//! Attachment downloads
//!
//! Skype and Teams host attachment content behind the connector's OAuth2
//! token; other channels serve it anonymously.

use std::pin::Pin;

use bytes::Bytes;
use domain::{Attachment, InboundMessage, OCTET_STREAM};
use futures::{Stream, StreamExt};
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

use crate::client::ConnectorClient;
use crate::error::ConnectorError;

/// Streamed attachment body
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, ConnectorError>> + Send>>;

/// Downloads attachment content referenced by inbound messages
#[derive(Debug, Clone)]
pub struct AttachmentFetcher {
    connector: ConnectorClient,
}

impl AttachmentFetcher {
    /// Create a fetcher sharing the connector's HTTP client and token cache
    #[must_use]
    pub const fn new(connector: ConnectorClient) -> Self {
        Self { connector }
    }

    /// Start downloading an attachment of `message`
    ///
    /// Returns once response headers arrive; the body is streamed.
    /// An attachment without a content URL fails with `InvalidUrl` before
    /// any request is made.
    #[instrument(skip(self, message, attachment), fields(source = %message.source, url = ?attachment.content_url))]
    pub async fn fetch(
        &self,
        message: &InboundMessage,
        attachment: &Attachment,
    ) -> Result<ByteStream, ConnectorError> {
        let url = attachment
            .url()
            .map_err(|e| ConnectorError::InvalidUrl(e.to_string()))?;
        let request = self.connector.client.get(url);

        let request = if message.requires_bearer_token() {
            let token = self.connector.access_token().await?;
            request.bearer_auth(token).header(CONTENT_TYPE, OCTET_STREAM)
        } else {
            request.header(CONTENT_TYPE, attachment.content_type.as_str())
        };

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ConnectorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        debug!(
            content_length = ?response.content_length(),
            "Attachment download started"
        );

        Ok(Box::pin(
            response.bytes_stream().map(|chunk| chunk.map_err(ConnectorError::from)),
        ))
    }
}
