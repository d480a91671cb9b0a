use std::io;
use std::path::{Path, PathBuf};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::editor::{Rgb, color_names};
use crate::fonts::system_font_families;
use crate::session::{Collaborator, Confirm, Notice};
use crate::ui::dialog::{
    ConfirmPrompt, DialogOutcome, ListPicker, MessageBox, ModalDialog, TextPrompt,
};

/// Blocking source of terminal events for modal dialogs.
pub(super) trait EventSource {
    fn next_event(&mut self) -> io::Result<Event>;
}

/// Reads events straight from the terminal.
pub(super) struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> io::Result<Event> {
        event::read()
    }
}

/// Collaborator that answers session prompts with modal dialogs drawn over
/// the last rendered frame.
pub(super) struct TerminalCollaborator<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    events: &'a mut dyn EventSource,
    backdrop: &'a Buffer,
    /// Font families, loaded on first use and kept for the whole run.
    fonts: &'a mut Option<Vec<String>>,
}

impl<'a, B: Backend> TerminalCollaborator<'a, B> {
    pub(super) fn new(
        terminal: &'a mut Terminal<B>,
        events: &'a mut dyn EventSource,
        backdrop: &'a Buffer,
        fonts: &'a mut Option<Vec<String>>,
    ) -> Self {
        Self {
            terminal,
            events,
            backdrop,
            fonts,
        }
    }

    /// Drive `dialog` until it submits or is cancelled.
    ///
    /// Terminal failures are logged and treated as a cancel.
    fn run<D: ModalDialog>(&mut self, dialog: &mut D) -> Option<D::Output> {
        loop {
            let backdrop = self.backdrop;
            let drawn = self.terminal.draw(|frame| {
                let area = frame.area();
                paint_backdrop(frame.buffer_mut(), backdrop, area);
                dialog.render(frame, area);
            });
            if let Err(err) = drawn {
                tracing::warn!(%err, "failed to draw dialog");
                return None;
            }

            let event = match self.events.next_event() {
                Ok(event) => event,
                Err(err) => {
                    tracing::warn!(%err, "failed to read dialog input");
                    return None;
                }
            };
            let outcome = match event {
                Event::Key(key) if key.kind != KeyEventKind::Release => dialog.handle_key(key),
                Event::Paste(text) => {
                    dialog.handle_paste(&text);
                    DialogOutcome::Continue
                }
                _ => DialogOutcome::Continue,
            };
            match outcome {
                DialogOutcome::Continue => {}
                DialogOutcome::Submit(value) => return Some(value),
                DialogOutcome::Cancel => return None,
            }
        }
    }

    fn prompt_path(
        &mut self,
        title: &str,
        label: &str,
        default: Option<&Path>,
    ) -> Option<PathBuf> {
        let initial = default
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        let mut prompt = TextPrompt::new(title, label, &initial);
        let input = self.run(&mut prompt)?;
        let input = input.trim();
        (!input.is_empty()).then(|| PathBuf::from(input))
    }
}

/// Copy the cells of the last editor frame under the dialog.
fn paint_backdrop(buf: &mut Buffer, backdrop: &Buffer, area: Rect) {
    let area = area.intersection(backdrop.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(cell), Some(saved)) = (buf.cell_mut((x, y)), backdrop.cell((x, y))) {
                *cell = saved.clone();
            }
        }
    }
}

impl<B: Backend> Collaborator for TerminalCollaborator<'_, B> {
    fn pick_open_path(&mut self, default: Option<&Path>) -> Option<PathBuf> {
        self.prompt_path("Open", "File to open:", default)
    }

    fn pick_save_path(&mut self, default: Option<&Path>) -> Option<PathBuf> {
        self.prompt_path("Save", "Save to:", default)
    }

    fn choose_font(&mut self, current: &str) -> Option<String> {
        let families = self.fonts.get_or_insert_with(system_font_families).clone();
        let mut picker = ListPicker::new("Font", families, current);
        self.run(&mut picker)
    }

    fn prompt_font_size(&mut self, current: i32) -> Option<String> {
        let mut prompt = TextPrompt::new("Font Size", "Size in points:", &current.to_string());
        self.run(&mut prompt)
    }

    fn choose_color(&mut self, current: Rgb) -> Option<Rgb> {
        let names: Vec<&str> = color_names().take(6).collect();
        let mut prompt =
            TextPrompt::new("Text Color", "Color (#rrggbb or name):", &current.to_string())
                .with_hint(format!("e.g. {}, ...", names.join(", ")));
        loop {
            let input = self.run(&mut prompt)?;
            match input.parse::<Rgb>() {
                Ok(color) => return Some(color),
                Err(err) => prompt.set_error(err.to_string()),
            }
        }
    }

    fn confirm_unsaved(&mut self) -> Confirm {
        self.run(&mut ConfirmPrompt::new()).unwrap_or(Confirm::Cancel)
    }

    fn notify(&mut self, notice: &Notice) {
        tracing::debug!(title = %notice.title, "notice");
        let _ = self.run(&mut MessageBox::new(notice.clone()));
    }
}
