use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};

use crate::app::Model;
use crate::editor::EditorBuffer;

use super::layout::{ScreenLayout, char_width, display_col};
use super::{menu, status, style};

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let layout = ScreenLayout::new(area, model.active_toast().is_some());

    render_editor(model, frame, layout.editor);
    menu::render_menu_bar(model, frame, layout.menu_bar);
    if let Some(toast_area) = layout.toast {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, layout.status);

    if let Some(state) = model.menu {
        menu::render_dropdown(state, frame, area);
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect) {
    let session = &model.session;
    let buffer = session.buffer();
    let base = style::editor_style(session);
    let selection = buffer.selection();

    let start = model.scroll_offset;
    let end = (start + usize::from(area.height)).min(buffer.line_count());
    let lines: Vec<Line> = (start..end)
        .map(|line_idx| {
            let text = buffer.line_at(line_idx).unwrap_or_default();
            let first_char = buffer.line_start_char(line_idx);
            styled_line(&text, model.col_offset, usize::from(area.width), |offset| {
                char_style(base, buffer, selection.as_ref(), first_char + offset)
            })
        })
        .collect();

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).style(base), area);

    if model.menu.is_none()
        && let Some(position) = cursor_position(model, buffer, area)
    {
        frame.set_cursor_position(position);
    }
}

fn char_style(
    base: Style,
    buffer: &EditorBuffer,
    selection: Option<&Range<usize>>,
    idx: usize,
) -> Style {
    let mut style = base;
    if buffer.is_underlined(idx) {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if selection.is_some_and(|range| range.contains(&idx)) {
        style = style::selection_style(style);
    }
    style
}

/// Build the visible part of one line, merging runs of equal style.
///
/// `style_at` receives the char offset within the line.
fn styled_line(
    text: &str,
    col_offset: usize,
    width: usize,
    style_at: impl Fn(usize) -> Style,
) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;
    let mut col = 0;

    for (offset, ch) in text.chars().enumerate() {
        let start = col;
        col += char_width(ch);
        if col <= col_offset {
            continue;
        }
        if col > col_offset + width {
            break;
        }

        let style = style_at(offset);
        if run_style != Some(style) {
            if let Some(prev) = run_style {
                spans.push(Span::styled(std::mem::take(&mut run), prev));
            }
            run_style = Some(style);
        }
        if start < col_offset {
            // Wide char cut by the left edge: blank its visible cells.
            run.extend(std::iter::repeat_n(' ', col - col_offset));
        } else {
            run.push(if ch == '\t' { ' ' } else { ch });
        }
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }
    Line::from(spans)
}

/// Screen position of the text cursor, if it is inside the editor pane.
fn cursor_position(model: &Model, buffer: &EditorBuffer, area: Rect) -> Option<Position> {
    let cursor = buffer.cursor();
    let row = cursor.line.checked_sub(model.scroll_offset)?;
    let text = buffer.line_at(cursor.line).unwrap_or_default();
    let col = display_col(&text, cursor.col).checked_sub(model.col_offset)?;
    if row >= usize::from(area.height) || col >= usize::from(area.width) {
        return None;
    }
    let x = area.x + u16::try_from(col).ok()?;
    let y = area.y + u16::try_from(row).ok()?;
    Some(Position::new(x, y))
}
