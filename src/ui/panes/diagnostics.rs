//! Diagnostics pane rendering

use super::{pane_block, visible_rows};
use crate::diagnostics::{Diagnostic, Stage};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

fn stage_color(stage: Stage) -> Color {
    match stage {
        Stage::Lexical => DEFAULT_THEME.warning,
        Stage::Syntax => DEFAULT_THEME.error,
        Stage::Semantic => DEFAULT_THEME.secondary,
    }
}

/// Render the diagnostics list. The selected entry is kept in view.
pub fn render_diagnostics_pane(
    frame: &mut Frame,
    area: Rect,
    diagnostics: &[Diagnostic],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Diagnostics ({}) ", diagnostics.len());
    let block = pane_block(&title, is_focused);

    if diagnostics.is_empty() {
        let paragraph = Paragraph::new("No problems found")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.success));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = visible_rows(area);
    if selected < *scroll_offset {
        *scroll_offset = selected;
    } else if selected >= *scroll_offset + visible_height {
        *scroll_offset = selected + 1 - visible_height;
    }

    let items: Vec<ListItem> = diagnostics
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, diag)| {
            let is_selected = idx == selected;
            let marker = if is_selected { "> " } else { "  " };
            let stage = diag.stage();

            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.border_focused)),
                Span::styled(
                    format!("{:<9}", stage),
                    Style::default()
                        .fg(stage_color(stage))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(diag.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            ]);

            let item = ListItem::new(line);
            if is_selected && is_focused {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
