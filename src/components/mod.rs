pub mod difficulty_menu;
pub mod game_over;
pub mod game_view;
pub mod sprite_view;
pub mod status_line;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use difficulty_menu::{DifficultyMenu, DifficultyMenuProps};
pub use game_over::{GameOverOverlay, GameOverProps};
pub use game_view::{GameView, GameViewProps};
pub use sprite_view::{SpriteView, SpriteViewProps};
pub use status_line::{StatusLine, StatusLineProps};

use ratatui::style::Color;

pub const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
pub const ACCENT_RED: Color = Color::Rgb(224, 96, 96);
