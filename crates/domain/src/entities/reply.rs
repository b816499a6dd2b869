//! Outbound reply

use serde::{Deserialize, Serialize};

/// Attachment whose bytes are embedded in the reply as a data URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineAttachment {
    /// MIME type of the embedded content
    pub content_type: String,
    /// `data:<content type>;base64,<payload>`
    pub content_url: String,
    /// Display name
    pub name: String,
}

impl InlineAttachment {
    /// Build an inline attachment from an already base64-encoded payload
    pub fn from_base64(
        content_type: impl Into<String>,
        base64_payload: &str,
        name: impl Into<String>,
    ) -> Self {
        let content_type = content_type.into();
        let content_url = format!("data:{content_type};base64,{base64_payload}");
        Self {
            content_type,
            content_url,
            name: name.into(),
        }
    }
}

/// Outbound reply: text and/or one inline attachment
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reply {
    /// Reply text
    pub text: Option<String>,
    /// Inline attachment
    pub attachment: Option<InlineAttachment>,
}

impl Reply {
    /// A text-only reply
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            attachment: None,
        }
    }

    /// An attachment-only reply
    #[must_use]
    pub const fn attachment(attachment: InlineAttachment) -> Self {
        Self {
            text: None,
            attachment: Some(attachment),
        }
    }

    /// Whether the reply carries nothing to send
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.attachment.is_none()
    }
}
