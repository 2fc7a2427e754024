//! Runtime configuration resolved from the command line.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Difficulty, DEFAULT_SESSION_SECS};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GameConfig {
    /// Countdown length for each session.
    pub duration_secs: u32,
    /// Start the first session at this difficulty without showing the menu.
    pub difficulty: Option<Difficulty>,
    pub mute: bool,
    pub show_sprite: bool,
    pub use_cache: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_SESSION_SECS,
            difficulty: None,
            mute: false,
            show_sprite: true,
            use_cache: true,
        }
    }
}

pub fn data_root() -> PathBuf {
    let base = std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    base.join(".cache").join("pokegrow")
}

pub fn default_log_path() -> PathBuf {
    data_root().join("pokegrow.log")
}
