use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::session::{Command, Menu, Session};
use crate::ui::layout::{ScreenLayout, byte_col_at, display_col};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// The open drop-down and its highlighted entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub menu: Menu,
    pub selected: usize,
}

impl MenuState {
    pub const fn new(menu: Menu) -> Self {
        Self { menu, selected: 0 }
    }

    /// The highlighted command.
    pub fn command(self) -> Command {
        let commands = self.menu.commands();
        commands[self.selected.min(commands.len() - 1)]
    }
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
#[derive(Debug)]
pub struct Model {
    /// The editor session: buffer, formatting and commands
    pub session: Session,
    /// Open drop-down menu, if any
    pub menu: Option<MenuState>,
    /// First buffer line shown in the editor pane
    pub scroll_offset: usize,
    /// First screen column shown in the editor pane
    pub col_offset: usize,
    /// Terminal size
    pub width: u16,
    pub height: u16,
    toast: Option<Toast>,
}

impl Model {
    pub fn new(session: Session, terminal_size: (u16, u16)) -> Self {
        Self {
            session,
            menu: None,
            scroll_offset: 0,
            col_offset: 0,
            width: terminal_size.0,
            height: terminal_size.1,
            toast: None,
        }
    }

    pub const fn should_quit(&self) -> bool {
        self.session.should_quit()
    }

    pub const fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::new(self.area(), self.toast.is_some())
    }

    /// Rows available to the editor pane.
    pub fn editor_height(&self) -> usize {
        usize::from(self.layout().editor.height)
    }

    /// Adjust both scroll offsets so the cursor is on screen.
    pub fn ensure_cursor_visible(&mut self) {
        let editor = self.layout().editor;
        let buffer = self.session.buffer();
        let cursor = buffer.cursor();
        let line = buffer.line_at(cursor.line).unwrap_or_default();
        let cursor_col = display_col(&line, cursor.col);

        let height = usize::from(editor.height);
        if height == 0 || cursor.line < self.scroll_offset {
            self.scroll_offset = cursor.line;
        } else if cursor.line >= self.scroll_offset + height {
            self.scroll_offset = cursor.line + 1 - height;
        }

        let width = usize::from(editor.width);
        if width == 0 || cursor_col < self.col_offset {
            self.col_offset = cursor_col;
        } else if cursor_col >= self.col_offset + width {
            self.col_offset = cursor_col + 1 - width;
        }
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let max = self.session.buffer().line_count().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.saturating_add_signed(delta).min(max);
    }

    /// Buffer `(line, byte col)` under a screen position in the editor pane.
    ///
    /// With `clamp`, positions outside the pane snap to its nearest edge
    /// (used while dragging a selection).
    pub fn buffer_position(&self, column: u16, row: u16, clamp: bool) -> Option<(usize, usize)> {
        let editor = self.layout().editor;
        if editor.height == 0 || editor.width == 0 {
            return None;
        }
        let bottom = editor.y + editor.height - 1;
        let right = editor.x + editor.width - 1;
        let (column, row) = if clamp {
            (column.clamp(editor.x, right), row.clamp(editor.y, bottom))
        } else if crate::ui::layout::contains(editor, column, row) {
            (column, row)
        } else {
            return None;
        };

        let buffer = self.session.buffer();
        let last_line = buffer.line_count().saturating_sub(1);
        let line = (self.scroll_offset + usize::from(row - editor.y)).min(last_line);
        let text = buffer.line_at(line).unwrap_or_default();
        let col = byte_col_at(&text, self.col_offset + usize::from(column - editor.x));
        Some((line, col))
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self::new(Session::new(), (80, 24))
    }
}
