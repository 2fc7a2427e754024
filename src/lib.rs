//! Pokegrow - a Pokemon typing minigame for the terminal
//!
//! This library exposes the game's modules for the binary and for testing.

pub mod action;
pub mod api;
pub mod audio;
pub mod components;
pub mod config;
pub mod effect;
pub mod growth;
pub mod logging;
pub mod reducer;
pub mod round;
pub mod session;
pub mod sprite;
pub mod sprite_backend;
pub mod state;
pub mod timers;
pub mod words;
