//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering
//!
//! Session commands are the only side effects. They run after the pure
//! update and may block on modal dialogs drawn over the current frame.

mod dialog;
mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{MenuState, Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the startup options and runs the
/// event loop.
#[derive(Debug, Default)]
pub struct App {
    file: Option<PathBuf>,
    dark: bool,
    font: Option<String>,
    font_size: Option<u16>,
}

impl App {
    /// Create a new application, optionally opening `file` at startup.
    ///
    /// A file that does not exist yet starts an empty buffer that saves
    /// to that path.
    pub const fn new(file: Option<PathBuf>) -> Self {
        Self {
            file,
            dark: false,
            font: None,
            font_size: None,
        }
    }

    /// Start in dark mode.
    pub const fn with_dark_mode(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    /// Initial font family.
    pub fn with_font(mut self, family: Option<String>) -> Self {
        self.font = family;
        self
    }

    /// Initial font size in points.
    pub const fn with_font_size(mut self, size: Option<u16>) -> Self {
        self.font_size = size;
        self
    }
}
