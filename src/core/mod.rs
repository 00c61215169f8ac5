//! Core game module - states, events, settings, and data loading.
//!
//! This module provides the foundation that all other game systems build upon.

mod data;
mod error;
mod events;
mod plugin;
mod settings;
mod states;

pub use data::{load_or_default, load_ron, parse_ron};
pub use error::DataLoadError;
pub use events::*;
pub use plugin::CorePlugin;
pub use settings::{load_game_settings, GameSettings, SETTINGS_PATH};
pub use states::*;
