use std::path::{Path, PathBuf};

use crate::editor::Rgb;

/// Answer to the unsaved-changes prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirm {
    Save,
    Discard,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A blocking message the user has to dismiss.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".to_string(),
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

/// The UI facilities a session asks for input and reports through.
///
/// Every prompt returns `None` when the user cancels.
pub trait Collaborator {
    fn pick_open_path(&mut self, default: Option<&Path>) -> Option<PathBuf>;

    fn pick_save_path(&mut self, default: Option<&Path>) -> Option<PathBuf>;

    /// Pick a family from the host's installed fonts.
    fn choose_font(&mut self, current: &str) -> Option<String>;

    /// Raw text typed for the new font size.
    fn prompt_font_size(&mut self, current: i32) -> Option<String>;

    fn choose_color(&mut self, current: Rgb) -> Option<Rgb>;

    fn confirm_unsaved(&mut self) -> Confirm;

    fn notify(&mut self, notice: &Notice);

    /// Non-blocking one-line status report.
    fn status(&mut self, message: &str) {
        let _ = message;
    }
}
