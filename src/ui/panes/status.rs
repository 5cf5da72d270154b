//! Status bar rendering with counts and keybindings

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Figures shown on the left of the status bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub tokens: usize,
    pub items: usize,
    pub diagnostics: usize,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    file_name: &str,
    message: &str,
    counts: StatusCounts,
) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let bar_bg = DEFAULT_THEME.current_line_bg;
    let badge_bg = if counts.diagnostics == 0 {
        DEFAULT_THEME.success
    } else {
        DEFAULT_THEME.error
    };
    let badge = if counts.diagnostics == 0 {
        " OK ".to_string()
    } else {
        format!(" {} problem(s) ", counts.diagnostics)
    };

    let left_spans = vec![
        Span::styled(
            badge,
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", file_name),
            Style::default().bg(bar_bg).fg(DEFAULT_THEME.primary),
        ),
        Span::styled(" | ", Style::default().bg(bar_bg).fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!("{} tokens, {} items ", counts.tokens, counts.items),
            Style::default().bg(bar_bg).fg(DEFAULT_THEME.fg),
        ),
        Span::styled(" | ", Style::default().bg(bar_bg).fg(DEFAULT_THEME.comment)),
        Span::styled(
            format!(" {} ", message),
            Style::default().bg(bar_bg).fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(bar_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default().bg(bar_bg).fg(DEFAULT_THEME.fg);
    let sep_style = Style::default().bg(bar_bg).fg(DEFAULT_THEME.comment);

    let right_spans = vec![
        Span::styled(" ⇥ ", key_style),
        Span::styled(" pane ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↑/↓ ", key_style),
        Span::styled(" move ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ↵ ", key_style),
        Span::styled(" go to diagnostic ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(bar_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
