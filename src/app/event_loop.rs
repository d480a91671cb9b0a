use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::clipboard::TerminalClipboard;
use crate::editor::Font;
use crate::session::Session;

use super::dialog::{CrosstermEvents, EventSource, TerminalCollaborator};

/// Holds the latest terminal size until resizing has settled.
pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the editor until the user exits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure. Problems opening the initial file are
    /// shown in the UI instead.
    pub fn run(&mut self) -> Result<()> {
        let (session, startup_error) = self.initial_session();

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal: quill requires an interactive terminal")?;

        let result = execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)
            .context("Failed to enable mouse capture")
            .and_then(|()| {
                let size = terminal.size()?;
                let mut model = Model::new(session, (size.width, size.height));
                if let Some(err) = startup_error {
                    model.show_toast(ToastLevel::Error, err);
                }
                Self::event_loop(&mut terminal, &mut model)
            });

        // Restore terminal
        let _ = execute!(stdout(), DisableBracketedPaste, DisableMouseCapture);
        ratatui::restore();

        result
    }

    /// Session for the command-line options, plus a message if the file
    /// given on the command line could not be read.
    fn initial_session(&self) -> (Session, Option<String>) {
        let mut font = Font::default();
        if let Some(family) = &self.font {
            font = font.with_family(family.clone());
        }
        if let Some(size) = self.font_size.filter(|size| *size > 0) {
            font = font.with_size(i32::from(size));
        }
        let mut session = Session::new()
            .with_clipboard(Box::new(TerminalClipboard::new()))
            .with_font(font)
            .with_dark_mode(self.dark);

        let Some(path) = &self.file else {
            return (session, None);
        };
        if !path.exists() {
            tracing::info!(path = %path.display(), "starting new file");
            return (session.with_path(Some(path.clone())), None);
        }
        match session.open_path(path) {
            Ok(()) => (session, None),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = ?err, "failed to open initial file");
                (session, Some(format!("{err} ({})", path.display())))
            }
        }
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let start = Instant::now();
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut events = CrosstermEvents;
        let mut fonts: Option<Vec<String>> = None;
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let now_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                *model = update(std::mem::take(model), Message::Resize(width, height));
                needs_render = true;
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit() {
                break;
            }

            let poll_ms = if resize_debouncer.is_pending() { 10 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                let event_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                let msg = Self::handle_event(&event::read()?, model, event_ms, &mut resize_debouncer);
                if let Some(msg) = msg {
                    Self::process_message(terminal, model, &mut events, &mut fonts, msg)?;
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                let mut drained = 0_u32;
                while !model.should_quit() && event::poll(Duration::from_millis(0))? {
                    let drain_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                    let msg =
                        Self::handle_event(&event::read()?, model, drain_ms, &mut resize_debouncer);
                    if let Some(msg) = msg {
                        drained += 1;
                        Self::process_message(terminal, model, &mut events, &mut fonts, msg)?;
                        needs_render = true;
                    }
                }
                if drained > 0 {
                    tracing::trace!(drained, "coalesced events");
                }
            }
        }
        Ok(())
    }

    /// Apply one message: the pure update, then any side effects.
    fn process_message(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        events: &mut dyn EventSource,
        fonts: &mut Option<Vec<String>>,
        msg: Message,
    ) -> Result<()> {
        tracing::trace!(?msg, "message");
        let side_msg = msg.clone();
        *model = update(std::mem::take(model), msg);
        if !matches!(side_msg, Message::Command(_)) {
            return Ok(());
        }

        // Dialogs are drawn over the frame as it looks after the update.
        let backdrop = terminal
            .draw(|frame| crate::ui::render(model, frame))?
            .buffer
            .clone();
        let mut collab = TerminalCollaborator::new(terminal, events, &backdrop, fonts);
        Self::handle_message_side_effects(model, &mut collab, &side_msg);

        // The terminal may have been resized while a dialog was open.
        let size = terminal.size()?;
        if (size.width, size.height) != (model.width, model.height) {
            *model = update(
                std::mem::take(model),
                Message::Resize(size.width, size.height),
            );
        }
        Ok(())
    }
}
