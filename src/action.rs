use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteData;
use crate::state::Difficulty;
use crate::words::WordPool;

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    Init,
    WordsDidLoad(WordPool),

    SpriteDidLoad { id: u16, sprite: SpriteData },
    SpriteDidError { id: u16, error: String },

    MusicDidStart,
    MusicDidError(String),

    DifficultySelect(Difficulty),

    InputChar(char),
    InputBackspace,

    SessionRestart,

    UiTerminalResize(u16, u16),
    /// Advances the timer clock by one `CLOCK_TICK_MS` step
    Tick,
    Quit,
}
