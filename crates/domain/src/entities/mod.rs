//! Domain entities - The per-turn data model

mod audio;
mod message;
mod reply;

pub use audio::AudioFormat;
pub use message::{
    Attachment, ChannelAccount, ConversationAddress, ConversationUpdate, InboundMessage,
};
pub use reply::{InlineAttachment, Reply};
