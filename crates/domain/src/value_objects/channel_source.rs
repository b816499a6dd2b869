//! Channel source - Identifies the chat platform a message came from

use serde::{Deserialize, Serialize};
use std::fmt;

/// Chat platform a message originated from
///
/// Serialized as the Bot Framework `channelId` string. Unknown channels are
/// preserved verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ChannelSource {
    /// Skype consumer channel
    Skype,
    /// Microsoft Teams
    MsTeams,
    /// Bot Framework Emulator
    #[default]
    Emulator,
    /// Web Chat control / Direct Line
    WebChat,
    /// Any other channel id
    Other(String),
}

impl ChannelSource {
    /// Parse from a channel id
    ///
    /// Matching is exact; any other spelling is kept verbatim in `Other`.
    #[must_use]
    pub fn from_channel_id(id: &str) -> Self {
        match id {
            "skype" => Self::Skype,
            "msteams" => Self::MsTeams,
            "emulator" => Self::Emulator,
            "webchat" => Self::WebChat,
            _ => Self::Other(id.to_string()),
        }
    }

    /// The channel id string as used on the wire
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Skype => "skype",
            Self::MsTeams => "msteams",
            Self::Emulator => "emulator",
            Self::WebChat => "webchat",
            Self::Other(id) => id,
        }
    }

    /// Whether attachment URLs on this channel are protected by the bot's
    /// connector token
    #[must_use]
    pub const fn requires_bearer_token(&self) -> bool {
        matches!(self, Self::Skype | Self::MsTeams)
    }
}

impl fmt::Display for ChannelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for ChannelSource {
    fn from(value: String) -> Self {
        Self::from_channel_id(&value)
    }
}

impl From<ChannelSource> for String {
    fn from(value: ChannelSource) -> Self {
        value.as_str().to_string()
    }
}
