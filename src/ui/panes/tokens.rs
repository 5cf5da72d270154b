//! Token stream pane rendering

use super::{clamp_scroll, pane_block, visible_rows};
use crate::parser::token::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Padding},
    Frame,
};

fn kind_color(kind: TokenKind) -> ratatui::style::Color {
    match kind {
        TokenKind::Identifier => DEFAULT_THEME.fg,
        TokenKind::IntConst | TokenKind::FloatConst => DEFAULT_THEME.number,
        TokenKind::Unknown => DEFAULT_THEME.error,
        TokenKind::Eof => DEFAULT_THEME.comment,
        kind if kind.is_type_keyword() => DEFAULT_THEME.type_name,
        kind if kind.keyword_spelling().is_some() => DEFAULT_THEME.keyword,
        _ => DEFAULT_THEME.secondary,
    }
}

/// Render the token table pane: kind, text and position of every token
pub fn render_tokens_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token<'_>],
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let title = format!(" Tokens ({}) ", tokens.len());
    let block = pane_block(&title, is_focused).padding(Padding::new(1, 0, 0, 0));

    let visible_height = visible_rows(area);
    clamp_scroll(scroll_offset, tokens.len(), visible_height);

    let items: Vec<ListItem> = tokens
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|token| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<14}", token.kind.name()),
                    Style::default().fg(kind_color(token.kind)),
                ),
                Span::styled(
                    format!("{:<12}", token.text),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
                Span::styled(
                    format!("{}:{}", token.location.line, token.location.column),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
