use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::{MenuState, Model};

use super::layout::{dropdown_entry, dropdown_inner_width, dropdown_rect, menu_titles};
use super::style;

pub fn render_menu_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let open = model.menu.map(|state| state.menu);
    let mut spans = vec![Span::raw(" ")];
    for (menu, _, _) in menu_titles() {
        let title_style = if open == Some(menu) {
            style::bar_highlight_style()
        } else {
            style::bar_style()
        };
        spans.push(Span::styled(format!(" {} ", menu.label()), title_style));
    }
    let hint = if open.is_some() {
        "  Enter: run  Esc: close"
    } else {
        "  F10: menu"
    };
    spans.push(Span::styled(hint, style::bar_style().fg(Color::Gray)));

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(style::bar_style()),
        area,
    );
}

pub fn render_dropdown(state: MenuState, frame: &mut Frame, area: Rect) {
    let rect = dropdown_rect(state.menu, area);
    let inner_width = dropdown_inner_width(state.menu);
    let lines: Vec<Line> = state
        .menu
        .commands()
        .iter()
        .enumerate()
        .map(|(idx, command)| {
            let entry = dropdown_entry(*command, inner_width);
            if idx == state.selected {
                Line::styled(entry, style::dropdown_selected_style())
            } else {
                let split = entry.len() - command.shortcut().map_or(0, str::len);
                let (label, shortcut) = entry.split_at(split);
                Line::from(vec![
                    Span::raw(label.to_string()),
                    Span::styled(shortcut.to_string(), style::shortcut_style()),
                ])
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .style(style::dropdown_style());
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(block), rect);
}
