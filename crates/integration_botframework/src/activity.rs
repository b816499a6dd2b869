//! Bot Framework activity wire types
//!
//! Deserializes inbound activities posted to the bot's messaging endpoint and
//! builds outbound reply activities.

use domain::{
    Attachment, ChannelSource, ConversationAddress, ConversationUpdate, InboundMessage, Reply,
};
use serde::{Deserialize, Serialize};

use crate::error::ConnectorError;

/// Activity type of a user message
pub const ACTIVITY_MESSAGE: &str = "message";

/// Activity type of a membership change
pub const ACTIVITY_CONVERSATION_UPDATE: &str = "conversationUpdate";

/// Account on a channel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Conversation reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationAccount {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_group: Option<bool>,
}

/// Attachment as it appears on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireAttachment {
    pub content_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Bot Framework activity
///
/// Only the fields this bot reads or writes are modeled; unknown fields are
/// ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub activity_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation: Option<ConversationAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<WireAttachment>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members_added: Vec<ChannelAccount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to_id: Option<String>,
}

/// Activity types the bot distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    Message,
    ConversationUpdate,
    Other(String),
}

impl Activity {
    /// Classify the activity type
    #[must_use]
    pub fn kind(&self) -> ActivityKind {
        match self.activity_type.as_str() {
            ACTIVITY_MESSAGE => ActivityKind::Message,
            ACTIVITY_CONVERSATION_UPDATE => ActivityKind::ConversationUpdate,
            other => ActivityKind::Other(other.to_string()),
        }
    }

    /// Channel the activity came from
    #[must_use]
    pub fn source(&self) -> ChannelSource {
        self.channel_id
            .as_deref()
            .map(ChannelSource::from_channel_id)
            .unwrap_or_default()
    }

    /// Extract the reply address
    ///
    /// On inbound activities `recipient` is the bot and `from` is the user.
    pub fn address(&self) -> Result<ConversationAddress, ConnectorError> {
        let service_url = self
            .service_url
            .clone()
            .ok_or_else(|| ConnectorError::InvalidActivity("missing serviceUrl".to_string()))?;
        let conversation = self
            .conversation
            .as_ref()
            .ok_or_else(|| ConnectorError::InvalidActivity("missing conversation".to_string()))?;
        let bot = self
            .recipient
            .as_ref()
            .ok_or_else(|| ConnectorError::InvalidActivity("missing recipient".to_string()))?;
        let user = self.from.clone().unwrap_or_default();

        let address = ConversationAddress {
            service_url,
            conversation_id: conversation.id.clone(),
            activity_id: self.id.clone(),
            bot: domain::ChannelAccount::new(bot.id.clone(), bot.name.clone()),
            user: domain::ChannelAccount::new(user.id, user.name),
            locale: self.locale.clone(),
        };

        address
            .validate()
            .map_err(|e| ConnectorError::InvalidActivity(e.to_string()))?;

        Ok(address)
    }

    /// Convert a `message` activity into a domain message
    ///
    /// Attachments keep their wire order, including ones without a
    /// content URL (cards, inline content).
    pub fn to_inbound_message(&self) -> Result<InboundMessage, ConnectorError> {
        let mut message = InboundMessage::new(self.source(), self.address()?);
        message.text = self.text.clone();
        message.attachments = self
            .attachments
            .iter()
            .map(|a| {
                let attachment = match &a.content_url {
                    Some(url) => Attachment::new(a.content_type.clone(), url.clone()),
                    None => Attachment::without_url(a.content_type.clone()),
                };
                match &a.name {
                    Some(name) => attachment.with_name(name.clone()),
                    None => attachment,
                }
            })
            .collect();
        Ok(message)
    }

    /// Convert a `conversationUpdate` activity into a domain event
    pub fn to_conversation_update(&self) -> Result<ConversationUpdate, ConnectorError> {
        Ok(ConversationUpdate {
            source: self.source(),
            members_added: self
                .members_added
                .iter()
                .map(|m| domain::ChannelAccount::new(m.id.clone(), m.name.clone()))
                .collect(),
            address: self.address()?,
        })
    }

    /// Build the outbound message activity for a reply
    #[must_use]
    pub fn from_reply(address: &ConversationAddress, reply: &Reply) -> Self {
        Self {
            activity_type: ACTIVITY_MESSAGE.to_string(),
            from: Some(ChannelAccount {
                id: address.bot.id.clone(),
                name: address.bot.name.clone(),
            }),
            recipient: Some(ChannelAccount {
                id: address.user.id.clone(),
                name: address.user.name.clone(),
            }),
            conversation: Some(ConversationAccount {
                id: address.conversation_id.clone(),
                ..Default::default()
            }),
            text: reply.text.clone(),
            locale: address.locale.clone(),
            attachments: reply
                .attachment
                .iter()
                .map(|a| WireAttachment {
                    content_type: a.content_type.clone(),
                    content_url: Some(a.content_url.clone()),
                    name: Some(a.name.clone()),
                })
                .collect(),
            reply_to_id: address.activity_id.clone(),
            ..Default::default()
        }
    }
}
