//! Configuration for the drill editor
//!
//! Provides the configuration struct, its validation and file handling.
//! Supports JSON and TOML file formats.
//!
//! Configuration is organized into logical sections:
//! - Geometry (arc resolution, diameter rounding, units)
//! - Editor behaviour (new tool size, selection margin)
//! - Last-used slot parameters
//! - Last-used drill and slot array parameters
//! - Copy tool parameters

pub use exckit_core::units::Units;
use crate::error::{SettingsError, SettingsResult};
use exckit_core::{ArrayDirection, ArrayKind, LinearAxis, SlotOrientation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Geometry precision settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometrySettings {
    /// Segments used to tessellate a full circle
    pub circle_steps: u32,
    /// Decimals tool diameters are rounded to
    pub decimals: u32,
    /// Drawing units
    #[serde(default)]
    pub units: Units,
}

impl Default for GeometrySettings {
    fn default() -> Self {
        Self {
            circle_steps: 64,
            decimals: 4,
            units: Units::default(),
        }
    }
}

/// Editor behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Diameter proposed for a new tool
    pub new_tool_diameter: f64,
    /// A click selects the nearest shape only if it falls inside the shape's
    /// bounding box grown by this fraction of its larger side
    pub selection_margin: f64,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            new_tool_diameter: 1.0,
            selection_margin: 0.7,
        }
    }
}

/// Last-used slot parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotSettings {
    /// Overall slot length, end to end
    pub length: f64,
    pub orientation: SlotOrientation,
    /// Clockwise rotation in degrees, used with `SlotOrientation::Angle`
    pub angle: f64,
}

impl Default for SlotSettings {
    fn default() -> Self {
        Self {
            length: 5.0,
            orientation: SlotOrientation::X,
            angle: 0.0,
        }
    }
}

/// Last-used array parameters, shared by drill and slot arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArraySettings {
    pub kind: ArrayKind,
    /// Number of items
    pub size: u32,
    /// Linear arrays: advance axis
    pub axis: LinearAxis,
    /// Linear arrays: distance between items
    pub pitch: f64,
    /// Linear arrays: direction in degrees for `LinearAxis::Angle`
    pub linear_angle: f64,
    /// Circular arrays: winding
    pub direction: ArrayDirection,
    /// Circular arrays: angle between items in degrees
    pub angle: f64,
}

impl Default for ArraySettings {
    fn default() -> Self {
        Self {
            kind: ArrayKind::Linear,
            size: 5,
            axis: LinearAxis::X,
            pitch: 2.54,
            linear_angle: 0.0,
            direction: ArrayDirection::Cw,
            angle: 12.0,
        }
    }
}

/// Copy tool mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyMode {
    /// Single copy at the destination
    #[default]
    Normal,
    /// Copies along a line starting at the destination
    Linear,
    /// Rows and columns starting at the destination
    Grid,
    /// Copies around the reference point, starting at the destination
    Circular,
}

impl fmt::Display for CopyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Linear => write!(f, "linear"),
            Self::Grid => write!(f, "grid"),
            Self::Circular => write!(f, "circular"),
        }
    }
}

impl FromStr for CopyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "n" => Ok(Self::Normal),
            "linear" => Ok(Self::Linear),
            "grid" | "2d" => Ok(Self::Grid),
            "circular" => Ok(Self::Circular),
            _ => Err(format!("Unknown copy mode: {}", s)),
        }
    }
}

/// How grid copies step from one cell to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridPlacement {
    /// Step by the selection size plus a gap
    #[default]
    Spacing,
    /// Step by a fixed offset
    Offset,
}

/// Copy tool parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CopySettings {
    pub mode: CopyMode,
    /// Linear and circular modes
    pub array: ArraySettings,
    pub rows: u32,
    pub columns: u32,
    pub placement: GridPlacement,
    /// Gap between columns for `GridPlacement::Spacing`
    pub spacing_columns: f64,
    /// Gap between rows for `GridPlacement::Spacing`
    pub spacing_rows: f64,
    /// Column step for `GridPlacement::Offset`
    pub offset_x: f64,
    /// Row step for `GridPlacement::Offset`
    pub offset_y: f64,
}

impl Default for CopySettings {
    fn default() -> Self {
        Self {
            mode: CopyMode::Normal,
            array: ArraySettings::default(),
            rows: 2,
            columns: 2,
            placement: GridPlacement::Spacing,
            spacing_columns: 1.0,
            spacing_rows: 1.0,
            offset_x: 5.0,
            offset_y: 5.0,
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub geometry: GeometrySettings,
    #[serde(default)]
    pub editor: EditorSettings,
    #[serde(default)]
    pub slot: SlotSettings,
    #[serde(default)]
    pub drill_array: ArraySettings,
    #[serde(default)]
    pub slot_array: ArraySettings,
    #[serde(default)]
    pub copy: CopySettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => self.to_toml_string()?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("{}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// TOML rendering, as written by `save_to_file` for `.toml` paths
    pub fn to_toml_string(&self) -> SettingsResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.geometry.circle_steps < 4 {
            return Err(SettingsError::invalid(
                "geometry.circle_steps",
                "must be at least 4",
            ));
        }

        if self.geometry.decimals == 0 || self.geometry.decimals > 9 {
            return Err(SettingsError::invalid(
                "geometry.decimals",
                "must be between 1 and 9",
            ));
        }

        if !(self.editor.new_tool_diameter > 0.0) {
            return Err(SettingsError::invalid(
                "editor.new_tool_diameter",
                "must be > 0",
            ));
        }

        if !(self.editor.selection_margin >= 0.0) {
            return Err(SettingsError::invalid(
                "editor.selection_margin",
                "must be >= 0",
            ));
        }

        if !(self.slot.length > 0.0) {
            return Err(SettingsError::invalid("slot.length", "must be > 0"));
        }

        Self::validate_array("drill_array", &self.drill_array)?;
        Self::validate_array("slot_array", &self.slot_array)?;
        Self::validate_array("copy.array", &self.copy.array)?;

        if self.copy.rows == 0 || self.copy.columns == 0 {
            return Err(SettingsError::invalid(
                "copy.rows",
                "rows and columns must be > 0",
            ));
        }

        Ok(())
    }

    fn validate_array(section: &str, array: &ArraySettings) -> SettingsResult<()> {
        if array.size == 0 {
            return Err(SettingsError::invalid(
                format!("{}.size", section),
                "must be > 0",
            ));
        }

        if !array.pitch.is_finite() || !array.angle.is_finite() || !array.linear_angle.is_finite()
        {
            return Err(SettingsError::invalid(
                section,
                "pitch and angles must be finite",
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
