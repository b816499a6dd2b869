//! Inbound message - one received chat message and where to answer it

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::{ChannelSource, is_audio_content_type};

/// A participant account (user or bot) on a channel
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChannelAccount {
    /// Channel-specific account id
    pub id: String,
    /// Display name, if the channel provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ChannelAccount {
    /// Create an account with id and optional name
    pub fn new(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// Everything needed to send a reply back into the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationAddress {
    /// Base URL of the channel's connector service
    pub service_url: String,
    /// Conversation id
    pub conversation_id: String,
    /// Id of the activity being answered (absent for proactive sends)
    pub activity_id: Option<String>,
    /// The bot's own account on this channel
    pub bot: ChannelAccount,
    /// The user's account on this channel
    pub user: ChannelAccount,
    /// Locale of the inbound activity, e.g. "en-US"
    pub locale: Option<String>,
}

impl ConversationAddress {
    /// Validate that the address can be used to send a reply
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.service_url.trim().is_empty() {
            return Err(DomainError::InvalidAddress(
                "service url is empty".to_string(),
            ));
        }
        if self.conversation_id.trim().is_empty() {
            return Err(DomainError::InvalidAddress(
                "conversation id is empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reference to externally hosted attachment content
///
/// Only the URL and declared type are held; bytes are fetched on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Declared MIME type
    pub content_type: String,
    /// Where the content can be downloaded; cards and inline content
    /// carry none
    pub content_url: Option<String>,
    /// Original file name
    pub name: Option<String>,
}

impl Attachment {
    /// Create an attachment reference
    pub fn new(content_type: impl Into<String>, content_url: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            content_url: Some(content_url.into()),
            name: None,
        }
    }

    /// Create an attachment reference that has no download URL
    pub fn without_url(content_type: impl Into<String>) -> Self {
        Self {
            content_type: content_type.into(),
            content_url: None,
            name: None,
        }
    }

    /// Set the file name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the declared content type is one the bot transcribes
    #[must_use]
    pub fn is_audio(&self) -> bool {
        is_audio_content_type(&self.content_type)
    }

    /// The download URL
    ///
    /// # Errors
    /// Returns `DomainError::InvalidAttachment` when the attachment has no
    /// usable URL.
    pub fn url(&self) -> Result<&str, DomainError> {
        self.content_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                DomainError::InvalidAttachment(format!(
                    "{} attachment has no contentUrl",
                    self.content_type
                ))
            })
    }
}

/// An inbound chat message, immutable once received
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Platform the message came from
    pub source: ChannelSource,
    /// Message text (may be absent for attachment-only messages)
    pub text: Option<String>,
    /// Attachment references, possibly empty
    pub attachments: Vec<Attachment>,
    /// Reply addressing
    pub address: ConversationAddress,
}

impl InboundMessage {
    /// Create a message without text or attachments
    pub fn new(source: ChannelSource, address: ConversationAddress) -> Self {
        Self {
            source,
            text: None,
            attachments: Vec::new(),
            address,
        }
    }

    /// Set the message text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append an attachment
    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// The audio attachment to transcribe, if any
    ///
    /// Only the first attachment is considered.
    #[must_use]
    pub fn audio_attachment(&self) -> Option<&Attachment> {
        self.attachments.first().filter(|a| a.is_audio())
    }

    /// Whether this message carries an audio attachment
    #[must_use]
    pub fn has_audio_attachment(&self) -> bool {
        self.audio_attachment().is_some()
    }

    /// Whether fetching this message's attachments needs the connector token
    #[must_use]
    pub const fn requires_bearer_token(&self) -> bool {
        self.source.requires_bearer_token()
    }
}

/// Conversation membership change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationUpdate {
    /// Platform the event came from
    pub source: ChannelSource,
    /// Accounts added to the conversation
    pub members_added: Vec<ChannelAccount>,
    /// Where to send messages in this conversation
    pub address: ConversationAddress,
}

impl ConversationUpdate {
    /// Whether the bot itself was among the members added
    #[must_use]
    pub fn bot_was_added(&self) -> bool {
        self.members_added
            .iter()
            .any(|member| member.id == self.address.bot.id)
    }
}
