//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod attachment_port;
mod reply_port;
mod speech_port;

#[cfg(test)]
pub use attachment_port::MockAttachmentPort;
pub use attachment_port::{AttachmentPort, AudioStream};
#[cfg(test)]
pub use reply_port::MockReplyPort;
pub use reply_port::ReplyPort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::{SpeechPort, SynthesisResult, TranscriptionResult};
