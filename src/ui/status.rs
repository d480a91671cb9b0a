use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

use super::style;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let session = &model.session;
    let filename = session
        .path()
        .and_then(|path| path.file_name())
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());
    let dirty_indicator = if session.is_modified() {
        " [modified]"
    } else {
        ""
    };

    let buffer = session.buffer();
    let cursor = buffer.cursor();
    let col = buffer.cursor_char_idx() - buffer.line_start_char(cursor.line);
    let selection = buffer
        .selection()
        .map_or_else(String::new, |range| format!("  ({} selected)", range.len()));
    let dark = if session.display().dark_mode {
        "  [dark]"
    } else {
        ""
    };

    let status = format!(
        " {filename}{dirty_indicator}  {}{dark}  Ln {}, Col {}{selection}",
        session.font(),
        cursor.line + 1,
        col + 1
    );

    frame.render_widget(Paragraph::new(status).style(style::bar_style()), area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => ("[info]", style::bar_style()),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
