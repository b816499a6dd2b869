//! Turn service - Handles one inbound activity end to end
//!
//! A message with an audio attachment is fetched, transcribed and analyzed;
//! any other message gets the upload prompt. Afterwards the prompt can be
//! spoken back as an inline audio reply.

use std::{fmt, path::PathBuf, sync::Arc};

use domain::{Attachment, ConversationUpdate, InboundMessage, Reply, analyze};
use tracing::{debug, error, info, instrument};

use crate::{
    error::ApplicationError,
    ports::{AttachmentPort, ReplyPort, SpeechPort, TranscriptionResult},
    services::ReplyComposer,
};

/// Prompt sent when a message carries no audio
pub const NO_AUDIO_PROMPT: &str =
    "Did you upload an audio file? I'm more of an audible person. Try sending me a wav file";

/// Reply sent when the audio could not be fetched or transcribed
pub const TRANSCRIPTION_FAILED_REPLY: &str = "Oops! Something went wrong. Try again later.";

/// Sent when the bot joins a conversation
pub const GREETING: &str = "Hi! I am SpeechToText Bot. I can understand the content of any audio and convert it to text. Try sending me a wav file.";

/// Default display name of the spoken prompt attachment
pub const DEFAULT_SYNTHESIZED_FILE_NAME: &str = "bing-synthesized.wav";

/// Configuration for turn handling
#[derive(Debug, Clone)]
pub struct TurnConfig {
    /// Speak the upload prompt after every message
    pub speak_prompt: bool,
    /// Directory for temporary audio files
    pub work_dir: PathBuf,
    /// Display name of the synthesized audio attachment
    ///
    /// Defaults to the name the Bing speech bot sample gave its replies.
    pub synthesized_file_name: String,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self {
            speak_prompt: true,
            work_dir: std::env::temp_dir(),
            synthesized_file_name: DEFAULT_SYNTHESIZED_FILE_NAME.to_string(),
        }
    }
}

/// What a message turn answered with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Audio was transcribed and the analysis sent
    Transcribed,
    /// Audio was present but could not be turned into text
    TranscriptionFailed,
    /// No audio; the upload prompt was sent
    Prompted,
}

/// Per-turn context: the message being answered and where answers go
pub struct Session<'a> {
    message: &'a InboundMessage,
    replies: &'a dyn ReplyPort,
}

impl fmt::Debug for Session<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl<'a> Session<'a> {
    /// Open a session for `message`
    pub fn new(message: &'a InboundMessage, replies: &'a dyn ReplyPort) -> Self {
        Self { message, replies }
    }

    /// The inbound message
    pub const fn message(&self) -> &InboundMessage {
        self.message
    }

    /// Answer the inbound message
    pub async fn send(&self, reply: Reply) -> Result<(), ApplicationError> {
        self.replies.reply(&self.message.address, reply).await
    }
}

/// Service running bot turns
pub struct TurnService {
    speech: Arc<dyn SpeechPort>,
    attachments: Arc<dyn AttachmentPort>,
    replies: Arc<dyn ReplyPort>,
    composer: ReplyComposer,
    config: TurnConfig,
}

impl fmt::Debug for TurnService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnService")
            .field("composer", &self.composer)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TurnService {
    /// Create a turn service with default configuration
    pub fn new(
        speech: Arc<dyn SpeechPort>,
        attachments: Arc<dyn AttachmentPort>,
        replies: Arc<dyn ReplyPort>,
    ) -> Self {
        Self::with_config(speech, attachments, replies, TurnConfig::default())
    }

    /// Create a turn service with custom configuration
    pub fn with_config(
        speech: Arc<dyn SpeechPort>,
        attachments: Arc<dyn AttachmentPort>,
        replies: Arc<dyn ReplyPort>,
        config: TurnConfig,
    ) -> Self {
        let composer = ReplyComposer::new(
            config.work_dir.clone(),
            config.synthesized_file_name.clone(),
        );
        Self {
            speech,
            attachments,
            replies,
            composer,
            config,
        }
    }

    /// Get the configuration
    pub const fn config(&self) -> &TurnConfig {
        &self.config
    }

    /// Whether the speech service answers
    pub async fn speech_available(&self) -> bool {
        self.speech.is_available().await
    }

    /// Handle a user message
    ///
    /// Fetch and transcription failures are answered in the conversation.
    /// Every other error, including synthesis and delivery failures, is
    /// returned.
    #[instrument(skip(self, message), fields(
        source = %message.source,
        conversation = %message.address.conversation_id,
        attachments = message.attachments.len()
    ))]
    pub async fn handle_message(
        &self,
        message: &InboundMessage,
    ) -> Result<TurnOutcome, ApplicationError> {
        let session = Session::new(message, self.replies.as_ref());

        let outcome = if let Some(attachment) = message.audio_attachment() {
            info!(content_type = %attachment.content_type, "Transcribing audio attachment");

            match self.transcribe(message, attachment).await {
                Ok(transcription) => {
                    debug!(
                        text_len = transcription.text.len(),
                        duration_ms = ?transcription.duration_ms,
                        "Transcription complete"
                    );
                    session
                        .send(Reply::text(analyze(Some(&transcription.text))))
                        .await?;
                    TurnOutcome::Transcribed
                },
                Err(e) if e.is_transcription_failure() => {
                    error!(error = %e, "Audio could not be transcribed");
                    session.send(Reply::text(TRANSCRIPTION_FAILED_REPLY)).await?;
                    TurnOutcome::TranscriptionFailed
                },
                Err(e) => return Err(e),
            }
        } else {
            session.send(Reply::text(NO_AUDIO_PROMPT)).await?;
            TurnOutcome::Prompted
        };

        if self.config.speak_prompt {
            debug!("Speaking upload prompt");
            let audio = self.speech.synthesize(NO_AUDIO_PROMPT.to_string()).await?;
            session.send(self.composer.compose(&audio).await).await?;
        }

        info!(outcome = ?outcome, "Turn complete");
        Ok(outcome)
    }

    /// Handle a membership change
    ///
    /// Greets the conversation when the bot itself was added. Returns whether
    /// a greeting was sent.
    #[instrument(skip(self, update), fields(
        conversation = %update.address.conversation_id,
        members_added = update.members_added.len()
    ))]
    pub async fn handle_conversation_update(
        &self,
        update: &ConversationUpdate,
    ) -> Result<bool, ApplicationError> {
        if !update.bot_was_added() {
            debug!("Bot not among added members, ignoring");
            return Ok(false);
        }

        self.replies
            .send(&update.address, Reply::text(GREETING))
            .await?;
        info!("Greeting sent");
        Ok(true)
    }

    async fn transcribe(
        &self,
        message: &InboundMessage,
        attachment: &Attachment,
    ) -> Result<TranscriptionResult, ApplicationError> {
        let format = domain::AudioFormat::from_mime_type(&attachment.content_type)
            .unwrap_or(domain::AudioFormat::Wav);

        let stream = self.attachments.fetch(message, attachment).await?;
        self.speech.transcribe(stream, format).await
    }
}
