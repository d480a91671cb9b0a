use std::path::{Path, PathBuf};

use crate::app::{App, Message, Model, ToastLevel};
use crate::editor::Rgb;
use crate::session::{Collaborator, Confirm, Notice};

/// Forwards every request to the wrapped collaborator and keeps the last
/// status line so the event loop can show it as a toast.
pub(super) struct StatusReporter<'a> {
    inner: &'a mut dyn Collaborator,
    last_status: Option<String>,
}

impl<'a> StatusReporter<'a> {
    pub(super) fn new(inner: &'a mut dyn Collaborator) -> Self {
        Self {
            inner,
            last_status: None,
        }
    }

    pub(super) fn into_status(self) -> Option<String> {
        self.last_status
    }
}

impl Collaborator for StatusReporter<'_> {
    fn pick_open_path(&mut self, default: Option<&Path>) -> Option<PathBuf> {
        self.inner.pick_open_path(default)
    }

    fn pick_save_path(&mut self, default: Option<&Path>) -> Option<PathBuf> {
        self.inner.pick_save_path(default)
    }

    fn choose_font(&mut self, current: &str) -> Option<String> {
        self.inner.choose_font(current)
    }

    fn prompt_font_size(&mut self, current: i32) -> Option<String> {
        self.inner.prompt_font_size(current)
    }

    fn choose_color(&mut self, current: Rgb) -> Option<Rgb> {
        self.inner.choose_color(current)
    }

    fn confirm_unsaved(&mut self) -> Confirm {
        self.inner.confirm_unsaved()
    }

    fn notify(&mut self, notice: &Notice) {
        self.inner.notify(notice);
    }

    fn status(&mut self, message: &str) {
        self.inner.status(message);
        self.last_status = Some(message.to_string());
    }
}

impl App {
    /// Run the effects a message implies after the pure update.
    ///
    /// Only session commands have effects: they may block on dialogs
    /// through `collab` and touch the file system.
    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        collab: &mut dyn Collaborator,
        msg: &Message,
    ) {
        if let Message::Command(command) = msg {
            let mut reporter = StatusReporter::new(collab);
            model.session.dispatch(*command, &mut reporter);
            if let Some(status) = reporter.into_status() {
                model.show_toast(ToastLevel::Info, status);
            }
            model.ensure_cursor_visible();
        }
    }
}
