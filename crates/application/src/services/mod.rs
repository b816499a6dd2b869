//! Application services - Use case implementations

mod reply_composer;
mod turn_service;

pub use reply_composer::{FILE_ERROR_REPLY, ReplyComposer};
pub use turn_service::{
    DEFAULT_SYNTHESIZED_FILE_NAME, GREETING, NO_AUDIO_PROMPT, Session,
    TRANSCRIPTION_FAILED_REPLY, TurnConfig, TurnOutcome, TurnService,
};
