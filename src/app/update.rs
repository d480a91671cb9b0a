use crate::app::Model;
use crate::app::model::MenuState;
use crate::editor::{Direction, EditorBuffer};
use crate::session::{Command, Menu};

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
/// Movement messages carry `true` when Shift extends the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Editing
    /// Insert a character at the cursor
    InsertChar(char),
    /// Insert pasted text at the cursor
    InsertText(String),
    /// Delete selection or character before cursor (Backspace)
    DeleteBack,
    /// Delete selection or character at cursor (Delete)
    DeleteForward,
    /// Split line at cursor (Enter)
    SplitLine,

    // Movement
    MoveCursor(Direction, bool),
    MoveHome(bool),
    MoveEnd(bool),
    MoveWordLeft(bool),
    MoveWordRight(bool),
    MoveToStart(bool),
    MoveToEnd(bool),
    PageUp(bool),
    PageDown(bool),

    // Selection
    SelectAll,
    ClearSelection,
    /// Mouse press at a screen position: place the cursor and anchor
    MouseDown(u16, u16),
    /// Mouse drag to a screen position: extend the selection
    MouseDrag(u16, u16),

    // Scrolling
    ScrollUp(usize),
    ScrollDown(usize),

    // Menu bar
    /// Open a drop-down, or close it if it is already open
    OpenMenu(Menu),
    CloseMenu,
    MenuLeft,
    MenuRight,
    MenuUp,
    MenuDown,

    /// Run a session command (handled as a side effect)
    Command(Command),

    // Window
    /// Terminal resized
    Resize(u16, u16),
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Commands only close the menu here; they run in the side-effect step
/// because they may prompt the user or touch the file system.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Editing
        Message::InsertChar(ch) => edit(&mut model, |buf| buf.insert_char(ch)),
        Message::InsertText(text) => edit(&mut model, |buf| buf.insert_str(&text)),
        Message::DeleteBack => edit(&mut model, |buf| {
            buf.delete_back();
        }),
        Message::DeleteForward => edit(&mut model, |buf| {
            buf.delete_forward();
        }),
        Message::SplitLine => edit(&mut model, EditorBuffer::split_line),

        // Movement
        Message::MoveCursor(dir, extend) => {
            move_cursor(&mut model, extend, |buf| buf.move_cursor(dir));
        }
        Message::MoveHome(extend) => move_cursor(&mut model, extend, EditorBuffer::move_home),
        Message::MoveEnd(extend) => move_cursor(&mut model, extend, EditorBuffer::move_end),
        Message::MoveWordLeft(extend) => {
            move_cursor(&mut model, extend, EditorBuffer::move_word_left);
        }
        Message::MoveWordRight(extend) => {
            move_cursor(&mut model, extend, EditorBuffer::move_word_right);
        }
        Message::MoveToStart(extend) => {
            move_cursor(&mut model, extend, EditorBuffer::move_to_start);
        }
        Message::MoveToEnd(extend) => move_cursor(&mut model, extend, EditorBuffer::move_to_end),
        Message::PageUp(extend) => {
            let rows = model.editor_height().saturating_sub(1).max(1);
            move_cursor(&mut model, extend, |buf| {
                for _ in 0..rows {
                    buf.move_cursor(Direction::Up);
                }
            });
        }
        Message::PageDown(extend) => {
            let rows = model.editor_height().saturating_sub(1).max(1);
            move_cursor(&mut model, extend, |buf| {
                for _ in 0..rows {
                    buf.move_cursor(Direction::Down);
                }
            });
        }

        // Selection
        Message::SelectAll => {
            model.session.buffer_mut().select_all();
            model.ensure_cursor_visible();
        }
        Message::ClearSelection => model.session.buffer_mut().clear_selection(),
        Message::MouseDown(column, row) => {
            model.menu = None;
            if let Some((line, col)) = model.buffer_position(column, row, false) {
                let buf = model.session.buffer_mut();
                buf.clear_selection();
                buf.move_to(line, col);
                buf.set_anchor_if_none();
            }
        }
        Message::MouseDrag(column, row) => {
            if let Some((line, col)) = model.buffer_position(column, row, true) {
                let buf = model.session.buffer_mut();
                buf.set_anchor_if_none();
                buf.move_to(line, col);
                model.ensure_cursor_visible();
            }
        }

        // Scrolling
        Message::ScrollUp(n) => model.scroll_by(-isize::try_from(n).unwrap_or(isize::MAX)),
        Message::ScrollDown(n) => model.scroll_by(isize::try_from(n).unwrap_or(isize::MAX)),

        // Menu bar
        Message::OpenMenu(menu) => {
            model.menu = match model.menu {
                Some(state) if state.menu == menu => None,
                _ => Some(MenuState::new(menu)),
            };
        }
        Message::CloseMenu | Message::Command(_) => model.menu = None,
        Message::MenuLeft => {
            if let Some(state) = model.menu {
                model.menu = Some(MenuState::new(cycle(&Menu::ALL, state.menu, -1)));
            }
        }
        Message::MenuRight => {
            if let Some(state) = model.menu {
                model.menu = Some(MenuState::new(cycle(&Menu::ALL, state.menu, 1)));
            }
        }
        Message::MenuUp => {
            if let Some(state) = &mut model.menu {
                let len = state.menu.commands().len();
                state.selected = (state.selected + len - 1) % len;
            }
        }
        Message::MenuDown => {
            if let Some(state) = &mut model.menu {
                state.selected = (state.selected + 1) % state.menu.commands().len();
            }
        }

        // Window
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.ensure_cursor_visible();
        }
    }
    model
}

fn edit(model: &mut Model, f: impl FnOnce(&mut EditorBuffer)) {
    f(model.session.buffer_mut());
    model.ensure_cursor_visible();
}

fn move_cursor(model: &mut Model, extend: bool, f: impl FnOnce(&mut EditorBuffer)) {
    let buf = model.session.buffer_mut();
    if extend {
        buf.set_anchor_if_none();
    } else {
        buf.clear_selection();
    }
    f(buf);
    model.ensure_cursor_visible();
}

fn cycle<T: Copy + PartialEq>(items: &[T], current: T, step: isize) -> T {
    let len = items.len();
    let idx = items.iter().position(|item| *item == current).unwrap_or(0);
    let step = step.rem_euclid(isize::try_from(len).unwrap_or(1));
    items[(idx + step.unsigned_abs()) % len]
}
