//! Turn handling configuration.

use std::path::PathBuf;

use application::TurnConfig;
use serde::{Deserialize, Serialize};

use super::default_true;

/// Turn handling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnAppConfig {
    /// Speak the upload prompt after every message (default: true)
    #[serde(default = "default_true")]
    pub speak_prompt: bool,

    /// Directory for temporary audio files (default: system temp dir)
    #[serde(default)]
    pub work_dir: Option<PathBuf>,

    /// Display name of the synthesized audio attachment
    #[serde(default = "default_synthesized_file_name")]
    pub synthesized_file_name: String,
}

fn default_synthesized_file_name() -> String {
    application::DEFAULT_SYNTHESIZED_FILE_NAME.to_string()
}

impl Default for TurnAppConfig {
    fn default() -> Self {
        Self {
            speak_prompt: true,
            work_dir: None,
            synthesized_file_name: default_synthesized_file_name(),
        }
    }
}

impl TurnAppConfig {
    /// Convert to the turn service configuration
    #[must_use]
    pub fn to_turn_config(&self) -> TurnConfig {
        TurnConfig {
            speak_prompt: self.speak_prompt,
            work_dir: self.work_dir.clone().unwrap_or_else(std::env::temp_dir),
            synthesized_file_name: self.synthesized_file_name.clone(),
        }
    }
}
