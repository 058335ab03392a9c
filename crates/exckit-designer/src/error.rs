//! Error types for the designer crate.
//!
//! Geometry failures come from `exckit-core`; this module adds the errors of
//! the editing layer on top (selection, tool table and document handling).

use exckit_core::{GeometryError, ToolDiameter};
use exckit_settings::SettingsError;
use std::io;
use thiserror::Error;

/// Errors raised by editor operations.
///
/// Every failing operation leaves the shape store unchanged.
#[derive(Error, Debug)]
pub enum EditorError {
    /// A geometric construction failed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The operation needs a selection and there is none.
    #[error("Nothing selected")]
    NothingSelected,

    /// A tool with this diameter already exists.
    #[error("Tool {0} already exists in the tool table")]
    ToolExists(ToolDiameter),

    /// No tool with this diameter exists.
    #[error("Tool {0} is not in the tool table")]
    UnknownTool(ToolDiameter),

    /// No tool is active for a placement.
    #[error("No tool selected for placement")]
    NoActiveTool,

    /// The input does not fit the active drawing tool.
    #[error("{action} is not available while the {tool} tool is active")]
    WrongTool { tool: String, action: String },

    /// The editor configuration is invalid.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A document could not be read or written.
    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),

    /// I/O error while reading or writing a document.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl EditorError {
    pub fn wrong_tool(tool: impl ToString, action: impl Into<String>) -> Self {
        Self::WrongTool {
            tool: tool.to_string(),
            action: action.into(),
        }
    }
}

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
