//! Screen geometry shared by rendering and mouse hit-testing.
//!
//! The screen is, top to bottom: a one-row menu bar, the editor pane, an
//! optional toast row and a one-row status bar. Drop-down menus hang off
//! their title in the menu bar.

use ratatui::layout::Rect;
use unicode_width::UnicodeWidthChar;

use crate::session::{Command, Menu};

/// Column of the first menu title.
const MENU_TITLE_START: u16 = 1;
/// Blank cells on each side of a menu title.
const MENU_TITLE_PAD: u16 = 1;
/// Gap between a drop-down label and its shortcut hint.
const SHORTCUT_GAP: usize = 3;

/// Rectangles of the main screen regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub menu_bar: Rect,
    pub editor: Rect,
    pub toast: Option<Rect>,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect, toast_active: bool) -> Self {
        let menu_height = area.height.min(1);
        let footer = (1 + u16::from(toast_active)).min(area.height - menu_height);
        let bottom = area.y + area.height;
        let menu_bar = Rect {
            height: menu_height,
            ..area
        };
        let editor = Rect {
            y: area.y + menu_height,
            height: area.height - menu_height - footer,
            ..area
        };
        let status = Rect {
            y: bottom.saturating_sub(1).max(area.y),
            height: footer.min(1),
            ..area
        };
        let toast = (toast_active && footer == 2).then(|| Rect {
            y: bottom - 2,
            height: 1,
            ..area
        });
        Self {
            menu_bar,
            editor,
            toast,
            status,
        }
    }
}

fn title_width(menu: Menu) -> u16 {
    u16::try_from(menu.label().len()).unwrap_or(u16::MAX) + 2 * MENU_TITLE_PAD
}

/// Menu titles with their starting column and width in the menu bar.
pub fn menu_titles() -> impl Iterator<Item = (Menu, u16, u16)> {
    Menu::ALL.into_iter().scan(MENU_TITLE_START, |x, menu| {
        let start = *x;
        let width = title_width(menu);
        *x += width;
        Some((menu, start, width))
    })
}

/// The menu whose title covers `column`.
pub fn menu_at(column: u16) -> Option<Menu> {
    menu_titles()
        .find(|(_, start, width)| column >= *start && column < start + width)
        .map(|(menu, _, _)| menu)
}

/// Text of one drop-down entry, label left and shortcut right.
pub fn dropdown_entry(command: Command, inner_width: usize) -> String {
    let shortcut = command.shortcut().unwrap_or_default();
    let label_width = inner_width.saturating_sub(shortcut.len());
    format!("{:<label_width$}{shortcut}", command.label())
}

/// Width of a drop-down's content, borders excluded.
pub fn dropdown_inner_width(menu: Menu) -> usize {
    menu.commands()
        .iter()
        .map(|command| {
            let shortcut = command.shortcut().map_or(0, |s| s.len() + SHORTCUT_GAP);
            command.label().len() + shortcut
        })
        .max()
        .unwrap_or(0)
}

/// Area of the open drop-down for `menu`, kept inside `area`.
pub fn dropdown_rect(menu: Menu, area: Rect) -> Rect {
    let x = menu_titles()
        .find(|(m, _, _)| *m == menu)
        .map_or(area.x, |(_, start, _)| area.x + start);
    let width = u16::try_from(dropdown_inner_width(menu) + 2).unwrap_or(u16::MAX);
    let height = u16::try_from(menu.commands().len() + 2).unwrap_or(u16::MAX);
    let width = width.min(area.width);
    let height = height.min(area.height.saturating_sub(1));
    let x = x.min(area.x + area.width - width);
    Rect::new(x, area.y + 1, width, height)
}

/// Index of the drop-down entry under a screen position.
pub fn dropdown_item_at(menu: Menu, area: Rect, column: u16, row: u16) -> Option<usize> {
    let rect = dropdown_rect(menu, area);
    let inner_left = rect.x + 1;
    let inner_right = rect.x + rect.width.saturating_sub(1);
    let inner_top = rect.y + 1;
    if column < inner_left || column >= inner_right || row < inner_top {
        return None;
    }
    let idx = usize::from(row - inner_top);
    (idx < menu.commands().len() && row < rect.y + rect.height.saturating_sub(1)).then_some(idx)
}

/// Whether a screen position falls inside `rect`.
pub const fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}

/// Cells a character occupies in the editor. Tabs show as one blank.
pub fn char_width(ch: char) -> usize {
    if ch == '\t' { 1 } else { ch.width().unwrap_or(0) }
}

/// Screen column of byte offset `byte_col` within `line`.
pub fn display_col(line: &str, byte_col: usize) -> usize {
    line.char_indices()
        .take_while(|(idx, _)| *idx < byte_col)
        .map(|(_, ch)| char_width(ch))
        .sum()
}

/// Byte offset of the character drawn at screen column `col` of `line`.
///
/// Columns past the end of the line map to the line end.
pub fn byte_col_at(line: &str, col: usize) -> usize {
    let mut acc = 0;
    for (idx, ch) in line.char_indices() {
        let width = char_width(ch);
        if acc + width > col {
            return idx;
        }
        acc += width;
    }
    line.len()
}
