//! The editor session: one buffer, its formatting, and every user command.
//!
//! A [`Session`] never talks to the terminal directly. Commands that need
//! input (file paths, fonts, colors, confirmations) ask a [`Collaborator`],
//! which returns `None` when the user cancels.
//!
//! Commands are looked up through [`Command::handler`] and run with
//! [`Session::dispatch`].

mod collaborator;
mod command;
mod error;

pub use collaborator::{Collaborator, Confirm, Notice, NoticeLevel};
pub use command::{Command, Handler, Menu};
pub use error::SessionError;

use std::path::{Path, PathBuf};

use crate::clipboard::{Clipboard, Register};
use crate::editor::{
    DisplayState, EditorBuffer, Font, FontStyle, LineEnding, Rgb, WordCount, word_count,
};

/// Owns the document buffer, its display state and the clipboard.
pub struct Session {
    buffer: EditorBuffer,
    font: Font,
    foreground: Rgb,
    background: Rgb,
    display: DisplayState,
    clipboard: Box<dyn Clipboard>,
    path: Option<PathBuf>,
    line_ending: LineEnding,
    should_quit: bool,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("buffer", &self.buffer)
            .field("font", &self.font)
            .field("display", &self.display)
            .field("path", &self.path)
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// An empty, clean session in light mode with an in-memory clipboard.
    pub fn new() -> Self {
        let display = DisplayState::default();
        let (background, foreground) = display.colors();
        Self {
            buffer: EditorBuffer::empty(),
            font: Font::default(),
            foreground,
            background,
            display,
            clipboard: Box::new(Register::new()),
            path: None,
            line_ending: LineEnding::default(),
            should_quit: false,
        }
    }

    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.clipboard = clipboard;
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    #[must_use]
    pub fn with_dark_mode(mut self, dark: bool) -> Self {
        if self.display.dark_mode != dark {
            self.toggle_dark_mode();
        }
        self
    }

    /// Set the default path offered by the file pickers.
    #[must_use]
    pub fn with_path(mut self, path: Option<PathBuf>) -> Self {
        self.path = path;
        self
    }

    pub const fn buffer(&self) -> &EditorBuffer {
        &self.buffer
    }

    pub const fn buffer_mut(&mut self) -> &mut EditorBuffer {
        &mut self.buffer
    }

    pub const fn font(&self) -> &Font {
        &self.font
    }

    pub const fn foreground(&self) -> Rgb {
        self.foreground
    }

    pub const fn background(&self) -> Rgb {
        self.background
    }

    pub const fn display(&self) -> DisplayState {
        self.display
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub const fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Whether the buffer changed since the last successful open or save.
    pub const fn is_modified(&self) -> bool {
        self.buffer.is_dirty()
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run `command` through the dispatch table.
    pub fn dispatch(&mut self, command: Command, collab: &mut dyn Collaborator) {
        tracing::debug!(?command, modified = self.is_modified(), "dispatch");
        (command.handler())(self, collab);
    }

    // --- File ---

    /// Ask for a path and load it, replacing the buffer.
    ///
    /// Does not run the unsaved-changes gate; the `Open` command does.
    pub fn open_file(&mut self, collab: &mut dyn Collaborator) {
        let Some(path) = collab.pick_open_path(self.path.as_deref()) else {
            return;
        };
        match self.open_path(&path) {
            Ok(()) => collab.status(&format!("Opened {}", display_name(&path))),
            Err(err) => report(collab, &err),
        }
    }

    /// Load `path` into the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Open`] if the file cannot be read; the buffer
    /// is left untouched in that case.
    pub fn open_path(&mut self, path: &Path) -> Result<(), SessionError> {
        let bytes = std::fs::read(path).map_err(|source| SessionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
        };
        self.line_ending = LineEnding::detect(&text);
        self.buffer = EditorBuffer::from_text(&text);
        self.path = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), chars = self.buffer.char_count(), "opened file");
        Ok(())
    }

    /// Ask for a destination and write the buffer there.
    pub fn save_file(&mut self, collab: &mut dyn Collaborator) {
        let Some(path) = collab.pick_save_path(self.path.as_deref()) else {
            return;
        };
        match self.save_to(&path) {
            Ok(()) => collab.status(&format!("Saved {}", display_name(&path))),
            Err(err) => report(collab, &err),
        }
    }

    /// Write the buffer to `path` and mark it clean.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Save`] if the write fails; the modification
    /// flag is left as it was.
    pub fn save_to(&mut self, path: &Path) -> Result<(), SessionError> {
        let text = self.buffer.text();
        std::fs::write(path, self.line_ending.apply(&text).as_bytes()).map_err(|source| {
            SessionError::Save {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.buffer.mark_clean();
        self.path = Some(path.to_path_buf());
        tracing::info!(path = %path.display(), "saved file");
        Ok(())
    }

    /// Gate for actions that would drop unsaved changes.
    ///
    /// Returns `false` only when the user cancels. Choosing Save proceeds
    /// even if the save is cancelled or fails.
    pub fn confirm_unsaved_changes(&mut self, collab: &mut dyn Collaborator) -> bool {
        if !self.is_modified() {
            return true;
        }
        match collab.confirm_unsaved() {
            Confirm::Cancel => false,
            Confirm::Save => {
                self.save_file(collab);
                true
            }
            Confirm::Discard => true,
        }
    }

    pub fn exit(&mut self, collab: &mut dyn Collaborator) {
        if self.confirm_unsaved_changes(collab) {
            self.should_quit = true;
        }
    }

    // --- Edit ---

    pub fn cut(&mut self) {
        if let Some(text) = self.buffer.selected_text() {
            self.clipboard.set(&text);
            self.buffer.delete_selection();
        }
    }

    pub fn copy(&mut self) {
        if let Some(text) = self.buffer.selected_text() {
            self.clipboard.set(&text);
        }
    }

    pub fn paste(&mut self) {
        if let Some(text) = self.clipboard.get() {
            self.buffer.insert_str(&text);
        }
    }

    pub fn word_count(&self) -> WordCount {
        word_count(&self.buffer.text())
    }

    pub fn show_word_count(&self, collab: &mut dyn Collaborator) {
        let count = self.word_count();
        collab.notify(&Notice::info(
            "Word Count",
            format!("Words: {}\nCharacters: {}", count.words, count.chars),
        ));
    }

    // --- Format ---

    pub fn change_font(&mut self, collab: &mut dyn Collaborator) {
        if let Some(family) = collab.choose_font(&self.font.family) {
            self.set_font_family(&family);
        }
    }

    /// Replace the font family, keeping style and size.
    pub fn set_font_family(&mut self, family: &str) {
        self.font = self.font.with_family(family);
    }

    pub fn change_font_size(&mut self, collab: &mut dyn Collaborator) {
        let Some(input) = collab.prompt_font_size(self.font.size) else {
            return;
        };
        if let Err(err) = self.apply_font_size(&input) {
            report(collab, &err);
        }
    }

    /// Parse `input` and use it as the font size, keeping family and style.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidFontSize`] if `input` is not a decimal
    /// `i32`; the font is left unchanged. Zero and negative sizes are kept.
    pub fn apply_font_size(&mut self, input: &str) -> Result<i32, SessionError> {
        let size = parse_font_size(input)
            .ok_or_else(|| SessionError::InvalidFontSize(input.to_string()))?;
        self.font = self.font.with_size(size);
        Ok(size)
    }

    pub fn change_text_color(&mut self, collab: &mut dyn Collaborator) {
        if let Some(color) = collab.choose_color(self.foreground) {
            self.set_text_color(color);
        }
    }

    pub const fn set_text_color(&mut self, color: Rgb) {
        self.foreground = color;
    }

    /// Replace the style of the whole-buffer font, keeping family and size.
    pub fn set_font_style(&mut self, style: FontStyle) {
        self.font = self.font.with_style(style);
    }

    /// Flip underline on the selection based on its first character.
    pub fn toggle_underline(&mut self, collab: &mut dyn Collaborator) {
        let Some(range) = self.buffer.selection() else {
            collab.notify(&Notice::info("Underline", "Please select text to underline."));
            return;
        };
        let underlined = self.buffer.is_underlined(range.start);
        self.buffer.set_underline(range, !underlined);
        self.display.underline_intent = !self.display.underline_intent;
    }

    /// Flip dark mode; this also resets the text color.
    pub const fn toggle_dark_mode(&mut self) {
        self.display.dark_mode = !self.display.dark_mode;
        let (background, foreground) = self.display.colors();
        self.background = background;
        self.foreground = foreground;
    }

    pub fn about(collab: &mut dyn Collaborator) {
        collab.notify(&Notice::info(
            "About",
            format!(
                "Quill {}\nA minimal terminal text editor",
                env!("CARGO_PKG_VERSION")
            ),
        ));
    }
}

fn parse_font_size(input: &str) -> Option<i32> {
    input.parse::<i32>().ok()
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().to_string(),
    )
}

fn report(collab: &mut dyn Collaborator, err: &SessionError) {
    let cause = std::error::Error::source(err).map(ToString::to_string);
    tracing::warn!(error = %err, cause = cause.as_deref().unwrap_or("-"), "command failed");
    collab.notify(&Notice::error(err.to_string()));
}

#[cfg(test)]
mod tests;
