//! AST pane rendering

use super::{clamp_scroll, pane_block, visible_rows};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

/// Style one dump line: the node name in one color, its payload in another
fn style_dump_line(line: &str) -> Line<'_> {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];

    let (name, payload) = match trimmed.split_once(':') {
        Some((name, payload)) => (name, Some(payload)),
        None => (trimmed, None),
    };

    let mut spans = vec![
        Span::raw(indent),
        Span::styled(name, Style::default().fg(DEFAULT_THEME.primary)),
    ];
    if let Some(payload) = payload {
        let color = if name == "Number" {
            DEFAULT_THEME.number
        } else {
            DEFAULT_THEME.fg
        };
        spans.push(Span::styled(":", Style::default().fg(DEFAULT_THEME.comment)));
        spans.push(Span::styled(payload, Style::default().fg(color)));
    }
    Line::from(spans)
}

/// Render the AST dump pane
pub fn render_ast_pane(
    frame: &mut Frame,
    area: Rect,
    dump_lines: &[String],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = pane_block(" AST ", is_focused);

    if dump_lines.len() <= 1 {
        let paragraph = Paragraph::new("(empty tree)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_rows(area);
    clamp_scroll(scroll_offset, dump_lines.len(), visible_height);

    let items: Vec<ListItem> = dump_lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| ListItem::new(style_dump_line(line)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
