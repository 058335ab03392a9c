//! exckit Settings Crate
//!
//! Editor configuration: geometry precision, selection behaviour and the
//! last-used placement parameters for every drawing tool. The configuration
//! is a plain value handed to the editor explicitly; nothing here is global.

pub mod config;
pub mod error;
pub mod persistence;

pub use config::{
    ArraySettings, Config, CopyMode, CopySettings, EditorSettings, GeometrySettings,
    GridPlacement, SlotSettings,
};
pub use error::{SettingsError, SettingsResult};
pub use persistence::SettingsPersistence;
