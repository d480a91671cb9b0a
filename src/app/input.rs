use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::session::{Command, Menu};
use crate::ui::layout::{self, ScreenLayout};

use super::event_loop::ResizeDebouncer;

/// Lines moved per mouse wheel notch.
const WHEEL_LINES: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) => Some(Message::InsertText(text.clone())),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.menu.is_some() {
            return Self::handle_menu_key(key, model);
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        if alt
            && let KeyCode::Char(c) = key.code
            && let Some(menu) = menu_for_mnemonic(c)
        {
            return Some(Message::OpenMenu(menu));
        }

        if ctrl && let KeyCode::Char(c) = key.code {
            return match c.to_ascii_lowercase() {
                'a' => Some(Message::SelectAll),
                other => shortcut_command(other).map(Message::Command),
            };
        }

        match key.code {
            KeyCode::F(10) => Some(Message::OpenMenu(Menu::File)),
            KeyCode::F(1) => Some(Message::Command(Command::About)),
            KeyCode::Esc => Some(Message::ClearSelection),

            // Movement
            KeyCode::Left if ctrl => Some(Message::MoveWordLeft(shift)),
            KeyCode::Right if ctrl => Some(Message::MoveWordRight(shift)),
            KeyCode::Home if ctrl => Some(Message::MoveToStart(shift)),
            KeyCode::End if ctrl => Some(Message::MoveToEnd(shift)),
            KeyCode::Left => Some(Message::MoveCursor(Direction::Left, shift)),
            KeyCode::Right => Some(Message::MoveCursor(Direction::Right, shift)),
            KeyCode::Up => Some(Message::MoveCursor(Direction::Up, shift)),
            KeyCode::Down => Some(Message::MoveCursor(Direction::Down, shift)),
            KeyCode::Home => Some(Message::MoveHome(shift)),
            KeyCode::End => Some(Message::MoveEnd(shift)),
            KeyCode::PageUp => Some(Message::PageUp(shift)),
            KeyCode::PageDown => Some(Message::PageDown(shift)),

            // Editing
            KeyCode::Enter => Some(Message::SplitLine),
            KeyCode::Backspace => Some(Message::DeleteBack),
            KeyCode::Delete => Some(Message::DeleteForward),
            KeyCode::Tab => Some(Message::InsertChar('\t')),
            KeyCode::Char(c) if !alt => Some(Message::InsertChar(c)),
            _ => None,
        }
    }

    fn handle_menu_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let state = model.menu?;
        if key.modifiers.contains(KeyModifiers::ALT)
            && let KeyCode::Char(c) = key.code
        {
            return menu_for_mnemonic(c).map(Message::OpenMenu);
        }
        match key.code {
            KeyCode::Esc | KeyCode::F(10) => Some(Message::CloseMenu),
            KeyCode::Left => Some(Message::MenuLeft),
            KeyCode::Right => Some(Message::MenuRight),
            KeyCode::Up => Some(Message::MenuUp),
            KeyCode::Down => Some(Message::MenuDown),
            KeyCode::Enter => Some(Message::Command(state.command())),
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let area = model.area();
        let screen = ScreenLayout::new(area, model.active_toast().is_some());

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout::contains(screen.menu_bar, mouse.column, mouse.row) {
                    return match layout::menu_at(mouse.column) {
                        Some(menu) => Some(Message::OpenMenu(menu)),
                        None if model.menu.is_some() => Some(Message::CloseMenu),
                        None => None,
                    };
                }
                if let Some(state) = model.menu {
                    let dropdown = layout::dropdown_rect(state.menu, area);
                    if layout::contains(dropdown, mouse.column, mouse.row) {
                        return layout::dropdown_item_at(state.menu, area, mouse.column, mouse.row)
                            .map(|idx| Message::Command(state.menu.commands()[idx]));
                    }
                    return Some(Message::CloseMenu);
                }
                layout::contains(screen.editor, mouse.column, mouse.row)
                    .then_some(Message::MouseDown(mouse.column, mouse.row))
            }
            MouseEventKind::Drag(MouseButton::Left) if model.menu.is_none() => {
                Some(Message::MouseDrag(mouse.column, mouse.row))
            }
            MouseEventKind::ScrollUp if model.menu.is_none() => {
                Some(Message::ScrollUp(WHEEL_LINES))
            }
            MouseEventKind::ScrollDown if model.menu.is_none() => {
                Some(Message::ScrollDown(WHEEL_LINES))
            }
            _ => None,
        }
    }
}

fn menu_for_mnemonic(c: char) -> Option<Menu> {
    let c = c.to_ascii_lowercase();
    Menu::ALL.into_iter().find(|menu| menu.mnemonic() == c)
}

/// Command bound to Ctrl plus a letter.
fn shortcut_command(c: char) -> Option<Command> {
    let command = match c {
        'o' => Command::Open,
        's' => Command::Save,
        'q' => Command::Exit,
        'x' => Command::Cut,
        'c' => Command::Copy,
        'v' => Command::Paste,
        'w' => Command::WordCount,
        'b' => Command::Bold,
        'i' => Command::Italic,
        'u' => Command::Underline,
        'd' => Command::ToggleDarkMode,
        _ => return None,
    };
    Some(command)
}
