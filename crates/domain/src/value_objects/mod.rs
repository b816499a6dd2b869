//! Value Objects - Immutable, identity-less domain primitives

mod channel_source;
mod content_type;

pub use channel_source::ChannelSource;
pub use content_type::{AUDIO_WAV, OCTET_STREAM, is_audio_content_type};
