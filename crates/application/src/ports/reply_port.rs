//! Reply port - Interface for answering in a conversation

use async_trait::async_trait;
use domain::{ConversationAddress, Reply};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for delivering replies to a channel
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReplyPort: Send + Sync {
    /// Answer the activity the address points at
    async fn reply(
        &self,
        address: &ConversationAddress,
        reply: Reply,
    ) -> Result<(), ApplicationError>;

    /// Post a new activity into the conversation, not tied to an inbound one
    async fn send(
        &self,
        address: &ConversationAddress,
        reply: Reply,
    ) -> Result<(), ApplicationError>;
}
