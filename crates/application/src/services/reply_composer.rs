//! Reply composer - Packs synthesized audio into an inline reply attachment

use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use domain::{InlineAttachment, Reply};
use tracing::{debug, error, instrument};

use crate::ports::SynthesisResult;

/// Reply sent when the synthesized audio cannot be written or read back
pub const FILE_ERROR_REPLY: &str = "Oops. Error reading file.";

/// Writes synthesized audio to a temporary file and embeds it as a data URI
#[derive(Debug, Clone)]
pub struct ReplyComposer {
    work_dir: PathBuf,
    file_name: String,
}

impl ReplyComposer {
    /// Create a composer writing into `work_dir`
    pub fn new(work_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            file_name: file_name.into(),
        }
    }

    /// Directory temporary audio files are written to
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build the audio reply
    ///
    /// File errors are logged and turned into a text reply; they never fail
    /// the turn. The temporary file is removed before returning.
    #[instrument(skip(self, audio), fields(audio_size = audio.audio_data.len(), format = %audio.format))]
    pub async fn compose(&self, audio: &SynthesisResult) -> Reply {
        match self.round_trip(audio).await {
            Ok(encoded) => {
                debug!(encoded_len = encoded.len(), "Audio reply composed");
                Reply::attachment(InlineAttachment::from_base64(
                    audio.format.mime_type(),
                    &encoded,
                    self.file_name.clone(),
                ))
            },
            Err(e) => {
                error!(error = %e, work_dir = %self.work_dir.display(), "Failed to stage synthesized audio");
                Reply::text(FILE_ERROR_REPLY)
            },
        }
    }

    async fn round_trip(&self, audio: &SynthesisResult) -> std::io::Result<String> {
        let file = tempfile::Builder::new()
            .prefix("speechrelay-")
            .suffix(&format!(".{}", audio.format.extension()))
            .tempfile_in(&self.work_dir)?;

        tokio::fs::write(file.path(), &audio.audio_data).await?;
        let bytes = tokio::fs::read(file.path()).await?;

        // Dropping the handle deletes the file
        drop(file);

        Ok(STANDARD.encode(bytes))
    }
}

impl Default for ReplyComposer {
    fn default() -> Self {
        Self::new(std::env::temp_dir(), super::DEFAULT_SYNTHESIZED_FILE_NAME)
    }
}
