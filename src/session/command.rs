use crate::editor::FontStyle;

use super::{Collaborator, Session};

/// A command handler as stored in the dispatch table.
pub type Handler = fn(&mut Session, &mut dyn Collaborator);

/// Every user-facing action, one per menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Open,
    Save,
    Exit,
    Cut,
    Copy,
    Paste,
    WordCount,
    Font,
    FontSize,
    TextColor,
    Bold,
    Italic,
    Plain,
    Underline,
    ToggleDarkMode,
    About,
}

/// Top-level menus of the menu bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    File,
    Edit,
    Format,
    Help,
}

impl Menu {
    pub const ALL: [Self; 4] = [Self::File, Self::Edit, Self::Format, Self::Help];

    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Edit => "Edit",
            Self::Format => "Format",
            Self::Help => "Help",
        }
    }

    /// Key that opens this menu together with Alt.
    pub const fn mnemonic(self) -> char {
        match self {
            Self::File => 'f',
            Self::Edit => 'e',
            Self::Format => 'o',
            Self::Help => 'h',
        }
    }

    /// Entries of this menu in display order.
    pub const fn commands(self) -> &'static [Command] {
        match self {
            Self::File => &[Command::Open, Command::Save, Command::Exit],
            Self::Edit => &[
                Command::Cut,
                Command::Copy,
                Command::Paste,
                Command::WordCount,
            ],
            Self::Format => &[
                Command::Font,
                Command::FontSize,
                Command::TextColor,
                Command::Bold,
                Command::Italic,
                Command::Plain,
                Command::Underline,
                Command::ToggleDarkMode,
            ],
            Self::Help => &[Command::About],
        }
    }
}

impl Command {
    pub const ALL: [Self; 16] = [
        Self::Open,
        Self::Save,
        Self::Exit,
        Self::Cut,
        Self::Copy,
        Self::Paste,
        Self::WordCount,
        Self::Font,
        Self::FontSize,
        Self::TextColor,
        Self::Bold,
        Self::Italic,
        Self::Plain,
        Self::Underline,
        Self::ToggleDarkMode,
        Self::About,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Save => "Save",
            Self::Exit => "Exit",
            Self::Cut => "Cut",
            Self::Copy => "Copy",
            Self::Paste => "Paste",
            Self::WordCount => "Word Count",
            Self::Font => "Font",
            Self::FontSize => "Font Size",
            Self::TextColor => "Text Color",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Plain => "Plain",
            Self::Underline => "Underline",
            Self::ToggleDarkMode => "Toggle Dark Mode",
            Self::About => "About",
        }
    }

    pub const fn menu(self) -> Menu {
        match self {
            Self::Open | Self::Save | Self::Exit => Menu::File,
            Self::Cut | Self::Copy | Self::Paste | Self::WordCount => Menu::Edit,
            Self::Font
            | Self::FontSize
            | Self::TextColor
            | Self::Bold
            | Self::Italic
            | Self::Plain
            | Self::Underline
            | Self::ToggleDarkMode => Menu::Format,
            Self::About => Menu::Help,
        }
    }

    /// Shortcut hint shown next to the menu entry.
    pub const fn shortcut(self) -> Option<&'static str> {
        match self {
            Self::Open => Some("Ctrl+O"),
            Self::Save => Some("Ctrl+S"),
            Self::Exit => Some("Ctrl+Q"),
            Self::Cut => Some("Ctrl+X"),
            Self::Copy => Some("Ctrl+C"),
            Self::Paste => Some("Ctrl+V"),
            Self::WordCount => Some("Ctrl+W"),
            Self::Bold => Some("Ctrl+B"),
            Self::Italic => Some("Ctrl+I"),
            Self::Underline => Some("Ctrl+U"),
            Self::ToggleDarkMode => Some("Ctrl+D"),
            Self::About => Some("F1"),
            Self::Font | Self::FontSize | Self::TextColor | Self::Plain => None,
        }
    }

    /// Dispatch table entry for this command.
    pub fn handler(self) -> Handler {
        match self {
            Self::Open => |session, collab| {
                if session.confirm_unsaved_changes(collab) {
                    session.open_file(collab);
                }
            },
            Self::Save => |session, collab| session.save_file(collab),
            Self::Exit => |session, collab| session.exit(collab),
            Self::Cut => |session, _| session.cut(),
            Self::Copy => |session, _| session.copy(),
            Self::Paste => |session, _| session.paste(),
            Self::WordCount => |session, collab| session.show_word_count(collab),
            Self::Font => |session, collab| session.change_font(collab),
            Self::FontSize => |session, collab| session.change_font_size(collab),
            Self::TextColor => |session, collab| session.change_text_color(collab),
            Self::Bold => |session, _| session.set_font_style(FontStyle::Bold),
            Self::Italic => |session, _| session.set_font_style(FontStyle::Italic),
            Self::Plain => |session, _| session.set_font_style(FontStyle::Plain),
            Self::Underline => |session, collab| session.toggle_underline(collab),
            Self::ToggleDarkMode => |session, _| session.toggle_dark_mode(),
            Self::About => |_, collab| Session::about(collab),
        }
    }
}
