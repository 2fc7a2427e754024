//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::config::GameConfig;
use crate::growth::SizeMultiplier;
use crate::session::Session;
use crate::sprite::SpriteData;
use crate::timers::Scheduler;
use crate::words::WordPool;

/// Resolution of the clock that drives the scheduler.
pub const CLOCK_TICK_MS: u64 = 100;
pub const COUNTDOWN_PERIOD_MS: u64 = 1000;
pub const SHRINK_PERIOD_MS: u64 = 2000;
pub const DEFAULT_SESSION_SECS: u32 = 60;

/// Sprites are picked from the first-generation 151.
pub const SPRITE_ID_MAX: u16 = 151;

pub const MUSIC_URL: &str = "https://eta.vgmtreasurechest.com/soundtracks/pokemon-game-boy-pok-mon-sound-complete-set-play-cd/vfywpihuos/1-01.%20Opening.mp3";
pub const MUSIC_VOLUME: f32 = 0.2;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Amount the sprite shrinks on every shrink tick.
    pub fn shrink_step(self) -> SizeMultiplier {
        match self {
            Difficulty::Easy => SizeMultiplier::from_hundredths(2),
            Difficulty::Medium => SizeMultiplier::from_hundredths(3),
            Difficulty::Hard => SizeMultiplier::from_hundredths(5),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn hotkey(self) -> char {
        match self {
            Difficulty::Easy => '1',
            Difficulty::Medium => '2',
            Difficulty::Hard => '3',
        }
    }

    pub fn from_key(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            '1' | 'e' => Some(Difficulty::Easy),
            '2' | 'm' => Some(Difficulty::Medium),
            '3' | 'h' => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Coarse phase used for event routing and layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Init,
    Active,
    Ended,
}

#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Words", label = "Pool", debug_fmt)]
    pub pool: DataResource<WordPool>,

    #[debug(section = "Session", label = "Current", debug_fmt)]
    pub session: Option<Session>,

    #[debug(section = "Session", label = "Timers", debug_fmt)]
    pub scheduler: Scheduler,

    #[debug(section = "Sprite", label = "Id", debug_fmt)]
    pub sprite_id: Option<u16>,

    #[debug(skip)]
    pub sprite: DataResource<SpriteData>,

    #[debug(section = "Config", label = "Settings", debug_fmt)]
    pub config: GameConfig,

    #[debug(section = "Config", label = "Seed")]
    pub rng_seed: u64,

    #[debug(section = "Status", label = "Message", debug_fmt)]
    pub message: Option<String>,

    #[debug(section = "Status", label = "Music")]
    pub music_started: bool,

    #[debug(skip)]
    pub terminal_size: (u16, u16),
}

impl AppState {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            pool: DataResource::Empty,
            session: None,
            scheduler: Scheduler::default(),
            sprite_id: None,
            sprite: DataResource::Empty,
            config,
            rng_seed: seed,
            message: None,
            music_started: false,
            terminal_size: (80, 24),
        }
    }

    pub fn phase(&self) -> GamePhase {
        match &self.session {
            None => GamePhase::Init,
            Some(session) if session.is_ended() => GamePhase::Ended,
            Some(_) => GamePhase::Active,
        }
    }

    pub fn input_enabled(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.input_enabled())
    }

    pub fn words(&self) -> &[String] {
        self.pool
            .data()
            .map(|pool| pool.words())
            .unwrap_or_default()
    }

    pub fn pool_ready(&self) -> bool {
        self.pool.is_loaded()
    }

    pub fn size(&self) -> SizeMultiplier {
        self.session
            .as_ref()
            .map(|session| session.size)
            .unwrap_or_default()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(GameConfig::default(), seed_from_time())
    }
}

pub fn seed_from_time() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs() << 32) ^ now.subsec_nanos() as u64
}
