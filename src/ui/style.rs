//! Mapping from session formatting to terminal styles.
//!
//! The terminal cannot switch typefaces or point sizes, so only the font
//! style and the colors reach the screen. Family and size are shown in the
//! status bar.

use ratatui::style::{Color, Modifier, Style};

use crate::editor::{FontStyle, Rgb};
use crate::session::Session;

pub const fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

pub const fn font_modifier(style: FontStyle) -> Modifier {
    match style {
        FontStyle::Plain => Modifier::empty(),
        FontStyle::Bold => Modifier::BOLD,
        FontStyle::Italic => Modifier::ITALIC,
    }
}

/// Style of every character in the editor pane before per-range attributes.
pub fn editor_style(session: &Session) -> Style {
    Style::default()
        .fg(color(session.foreground()))
        .bg(color(session.background()))
        .add_modifier(font_modifier(session.font().style))
}

/// Style of the selected range, derived from the editor colors.
pub fn selection_style(base: Style) -> Style {
    base.add_modifier(Modifier::REVERSED)
}

pub fn bar_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

pub fn bar_highlight_style() -> Style {
    Style::default().bg(Color::White).fg(Color::Black)
}

pub fn dropdown_style() -> Style {
    Style::default().bg(Color::Black).fg(Color::White)
}

pub fn dropdown_selected_style() -> Style {
    dropdown_style().add_modifier(Modifier::REVERSED)
}

pub fn shortcut_style() -> Style {
    Style::default().fg(Color::Indexed(245))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_modifier_maps_styles() {
        assert_eq!(font_modifier(FontStyle::Plain), Modifier::empty());
        assert_eq!(font_modifier(FontStyle::Bold), Modifier::BOLD);
        assert_eq!(font_modifier(FontStyle::Italic), Modifier::ITALIC);
    }

    #[test]
    fn test_editor_style_uses_session_colors() {
        let session = Session::new().with_dark_mode(true);
        let style = editor_style(&session);
        assert_eq!(style.fg, Some(Color::Rgb(255, 255, 255)));
        assert_eq!(style.bg, Some(Color::Rgb(0, 0, 0)));
    }
}
