//! Modal dialogs drawn over the editor.
//!
//! Each dialog is plain state plus a key handler, so the blocking loop that
//! drives it (see `app::dialog`) stays trivial and the dialogs themselves
//! can be tested without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::session::{Confirm, Notice, NoticeLevel};

use super::layout::centered_rect;

/// What a key press did to a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Continue,
    Submit(T),
    Cancel,
}

/// A dialog the modal loop can drive.
pub trait ModalDialog {
    type Output;

    fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<Self::Output>;

    /// Text arriving through bracketed paste.
    fn handle_paste(&mut self, text: &str) {
        let _ = text;
    }

    fn render(&self, frame: &mut Frame, area: Rect);
}

fn dialog_block(title: &str, level: NoticeLevel) -> Block<'_> {
    let border = match level {
        NoticeLevel::Info => Color::White,
        NoticeLevel::Error => Color::Red,
    };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .padding(Padding::horizontal(1))
        .style(Style::default().bg(Color::Black).fg(Color::White))
}

fn hint_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

fn popup_width(area: Rect) -> u16 {
    area.width.saturating_sub(8).clamp(20, 64)
}

// --- Text prompt ---

/// Single-line text entry, used for paths, sizes and colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    title: String,
    label: String,
    hint: Option<String>,
    input: String,
    /// Cursor position in chars.
    cursor: usize,
    error: Option<String>,
}

impl TextPrompt {
    pub fn new(title: impl Into<String>, label: impl Into<String>, initial: &str) -> Self {
        Self {
            title: title.into(),
            label: label.into(),
            hint: None,
            input: initial.to_string(),
            cursor: initial.chars().count(),
            error: None,
        }
    }

    #[must_use]
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Show a validation error under the input until the next edit.
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn byte_idx(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map_or(self.input.len(), |(idx, _)| idx)
    }

    fn insert(&mut self, text: &str) {
        let at = self.byte_idx(self.cursor);
        let text: String = text.chars().filter(|ch| !ch.is_control()).collect();
        self.input.insert_str(at, &text);
        self.cursor += text.chars().count();
        self.error = None;
    }
}

impl ModalDialog for TextPrompt {
    type Output = String;

    fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<String> {
        match key.code {
            KeyCode::Enter => return DialogOutcome::Submit(self.input.clone()),
            KeyCode::Esc => return DialogOutcome::Cancel,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return DialogOutcome::Cancel;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input.clear();
                self.cursor = 0;
                self.error = None;
            }
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                let mut buf = [0; 4];
                self.insert(ch.encode_utf8(&mut buf));
            }
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = self.byte_idx(self.cursor);
                self.input.remove(at);
                self.error = None;
            }
            KeyCode::Delete if self.cursor < self.input.chars().count() => {
                let at = self.byte_idx(self.cursor);
                self.input.remove(at);
                self.error = None;
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.input.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.chars().count(),
            _ => {}
        }
        DialogOutcome::Continue
    }

    fn handle_paste(&mut self, text: &str) {
        self.insert(text);
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = popup_width(area);
        let height = 6 + u16::from(self.hint.is_some());
        let popup = centered_rect(width, height, area);

        let before: String = self.input.chars().take(self.cursor).collect();
        let at: String = self.input.chars().nth(self.cursor).map_or_else(|| " ".to_string(), String::from);
        let after: String = self.input.chars().skip(self.cursor + 1).collect();
        let input_style = Style::default().bg(Color::DarkGray).fg(Color::White);

        let mut lines = vec![
            Line::raw(self.label.clone()),
            Line::from(vec![
                Span::styled(before, input_style),
                Span::styled(at, input_style.add_modifier(Modifier::REVERSED)),
                Span::styled(after, input_style),
            ]),
        ];
        if let Some(hint) = &self.hint {
            lines.push(Line::styled(hint.clone(), hint_style()));
        }
        lines.push(match &self.error {
            Some(error) => Line::styled(error.clone(), Style::default().fg(Color::Red)),
            None => Line::styled("Enter: OK  Esc: cancel", hint_style()),
        });

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(dialog_block(&self.title, NoticeLevel::Info)),
            popup,
        );
    }
}

// --- List picker ---

/// Scrollable list with type-to-filter, used for choosing a font.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPicker {
    title: String,
    items: Vec<String>,
    filter: String,
    /// Index into the filtered items.
    selected: usize,
    offset: usize,
}

/// Rows of list shown at once.
const LIST_ROWS: usize = 12;

impl ListPicker {
    /// A picker over `items` with `current` preselected when present.
    pub fn new(title: impl Into<String>, items: Vec<String>, current: &str) -> Self {
        let selected = items.iter().position(|item| item == current).unwrap_or(0);
        let mut picker = Self {
            title: title.into(),
            items,
            filter: String::new(),
            selected,
            offset: 0,
        };
        picker.scroll_to_selected();
        picker
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Items matching the filter, case-insensitively.
    pub fn visible_items(&self) -> Vec<&str> {
        let needle = self.filter.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.to_lowercase().contains(&needle))
            .map(String::as_str)
            .collect()
    }

    pub fn selected_item(&self) -> Option<&str> {
        self.visible_items().get(self.selected).copied()
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_items().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
        self.scroll_to_selected();
    }

    const fn scroll_to_selected(&mut self) {
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + LIST_ROWS {
            self.offset = self.selected + 1 - LIST_ROWS;
        }
    }

    fn refilter(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }
}

impl ModalDialog for ListPicker {
    type Output = String;

    fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<String> {
        let page = isize::try_from(LIST_ROWS).unwrap_or(isize::MAX);
        match key.code {
            KeyCode::Enter => {
                return self
                    .selected_item()
                    .map_or(DialogOutcome::Continue, |item| DialogOutcome::Submit(item.to_string()));
            }
            KeyCode::Esc => return DialogOutcome::Cancel,
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-page),
            KeyCode::PageDown => self.move_selection(page),
            KeyCode::Home => self.move_selection(isize::MIN),
            KeyCode::End => self.move_selection(isize::MAX),
            KeyCode::Backspace => {
                if self.filter.pop().is_some() {
                    self.refilter();
                }
            }
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.filter.push(ch);
                self.refilter();
            }
            _ => {}
        }
        DialogOutcome::Continue
    }

    fn handle_paste(&mut self, text: &str) {
        self.filter.extend(text.chars().filter(|ch| !ch.is_control()));
        self.refilter();
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let width = popup_width(area);
        let height = u16::try_from(LIST_ROWS).unwrap_or(u16::MAX) + 5;
        let popup = centered_rect(width, height, area);

        let items = self.visible_items();
        let mut lines = vec![Line::from(vec![
            Span::styled("Filter: ", hint_style()),
            Span::raw(self.filter.clone()),
        ])];
        if items.is_empty() {
            lines.push(Line::styled("(no matches)", hint_style()));
        }
        lines.extend(
            items
                .iter()
                .enumerate()
                .skip(self.offset)
                .take(LIST_ROWS)
                .map(|(idx, item)| {
                    let style = if idx == self.selected {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    Line::styled((*item).to_string(), style)
                }),
        );
        let footer = Line::styled("Type to filter  Enter: choose  Esc: cancel", hint_style());

        frame.render_widget(Clear, popup);
        let block = dialog_block(&self.title, NoticeLevel::Info);
        let inner = block.inner(popup);
        frame.render_widget(block, popup);
        let list_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let footer_area = Rect {
            y: inner.y + inner.height.saturating_sub(1),
            height: inner.height.min(1),
            ..inner
        };
        frame.render_widget(Paragraph::new(lines), list_area);
        frame.render_widget(Paragraph::new(footer), footer_area);
    }
}

// --- Unsaved-changes confirmation ---

/// Save / Don't Save / Cancel buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    selected: usize,
}

const CONFIRM_CHOICES: [(Confirm, &str); 3] = [
    (Confirm::Save, "Save"),
    (Confirm::Discard, "Don't Save"),
    (Confirm::Cancel, "Cancel"),
];

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmPrompt {
    pub const fn new() -> Self {
        Self { selected: 0 }
    }

    pub const fn selected(&self) -> Confirm {
        CONFIRM_CHOICES[self.selected].0
    }
}

impl ModalDialog for ConfirmPrompt {
    type Output = Confirm;

    fn handle_key(&mut self, key: KeyEvent) -> DialogOutcome<Confirm> {
        let last = CONFIRM_CHOICES.len() - 1;
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => return DialogOutcome::Submit(self.selected()),
            KeyCode::Esc => return DialogOutcome::Cancel,
            KeyCode::Char('s' | 'S' | 'y' | 'Y') => return DialogOutcome::Submit(Confirm::Save),
            KeyCode::Char('d' | 'D' | 'n' | 'N') => return DialogOutcome::Submit(Confirm::Discard),
            KeyCode::Char('c' | 'C') => return DialogOutcome::Submit(Confirm::Cancel),
            KeyCode::Left | KeyCode::BackTab => {
                self.selected = self.selected.checked_sub(1).unwrap_or(last);
            }
            KeyCode::Right | KeyCode::Tab => {
                self.selected = if self.selected == last { 0 } else { self.selected + 1 };
            }
            _ => {}
        }
        DialogOutcome::Continue
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(popup_width(area).min(48), 7, area);

        let mut buttons = Vec::new();
        for (idx, (_, label)) in CONFIRM_CHOICES.iter().enumerate() {
            let style = if idx == self.selected {
                Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
            } else {
                Style::default()
            };
            buttons.push(Span::styled(format!("[ {label} ]"), style));
            buttons.push(Span::raw(" "));
        }
        let lines = vec![
            Line::raw("Do you want to save changes?"),
            Line::raw(""),
            Line::from(buttons).alignment(Alignment::Center),
            Line::styled("S: save  D: don't save  Esc: cancel", hint_style()),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(dialog_block("Unsaved Changes", NoticeLevel::Info)),
            popup,
        );
    }
}

// --- Message box ---

/// A notice dismissed by any key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBox {
    notice: Notice,
}

impl MessageBox {
    pub const fn new(notice: Notice) -> Self {
        Self { notice }
    }
}

impl ModalDialog for MessageBox {
    type Output = ();

    fn handle_key(&mut self, _key: KeyEvent) -> DialogOutcome<()> {
        DialogOutcome::Submit(())
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let body_lines = self.notice.message.lines().count().max(1);
        let height = u16::try_from(body_lines).unwrap_or(u16::MAX).saturating_add(4);
        let popup = centered_rect(popup_width(area).min(48), height, area);

        let mut lines: Vec<Line> = self.notice.message.lines().map(Line::raw).collect();
        lines.push(Line::raw(""));
        lines.push(Line::styled("Press any key", hint_style()));

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: false })
                .block(dialog_block(&self.notice.title, self.notice.level)),
            popup,
        );
    }
}
