//! Bot Framework integration
//!
//! Handles Bot Framework connector activities, OAuth2 client-credential
//! tokens, replies, and attachment downloads.

pub mod activity;
pub mod attachments;
pub mod client;
pub mod error;

pub use activity::{
    ACTIVITY_CONVERSATION_UPDATE, ACTIVITY_MESSAGE, Activity, ActivityKind, ChannelAccount,
    ConversationAccount, WireAttachment,
};
pub use attachments::{AttachmentFetcher, ByteStream};
pub use client::{ConnectorClient, ConnectorConfig, ResourceResponse};
pub use error::ConnectorError;
