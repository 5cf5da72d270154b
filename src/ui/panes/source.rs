//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the SysY program
//! being explored with basic syntax highlighting and diagnostic markers.
//!
//! # Features
//!
//! - Syntax highlighting for SysY keywords, types, numbers, and comments
//! - Lines carrying a diagnostic get a red line number and a `!` marker
//! - Cursor line highlighting, kept at a fixed row while it moves
//! - Line numbering
//!
//! # Rendering
//!
//! The pane uses a simple per-line character tokenizer to apply syntax
//! highlighting styles. Keyword classification reuses the lexer's keyword
//! table. A block comment is only recognized up to the end of its first line.

use super::{pane_block, visible_rows};
use crate::parser::token::TokenKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Simple syntax highlighting for one line of SysY code
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_idx, c) = chars[i];
        let next = chars.get(i + 1).map(|&(_, ch)| ch);

        // Comments run to the end of the line
        if c == '/' && matches!(next, Some('/' | '*')) {
            flush_word(&mut spans, &mut current_word, false);
            spans.push(Span::styled(
                &line[byte_idx..],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        // A '.' inside a number belongs to the number
        let continues_number = c == '.' && current_word.starts_with(|ch: char| ch.is_ascii_digit());

        if !c.is_alphanumeric() && c != '_' && !continues_number {
            flush_word(&mut spans, &mut current_word, c == '(');

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'_>>, word: &mut String, is_function: bool) {
    if !word.is_empty() {
        let style = get_keyword_style(word, is_function);
        spans.push(Span::styled(std::mem::take(word), style));
    }
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match TokenKind::from_keyword(word) {
        Some(kind) if kind.is_type_keyword() => Style::default().fg(DEFAULT_THEME.type_name),
        Some(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        None if word.starts_with(|c: char| c.is_ascii_digit() || c == '.') => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        None if is_function => Style::default().fg(DEFAULT_THEME.function),
        None => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

/// Render the source code pane
///
/// `cursor_line` is 1-based; `diagnostic_lines` lists the lines that carry
/// at least one diagnostic.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    cursor_line: usize,
    diagnostic_lines: &[usize],
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = pane_block(" Source Code ", is_focused);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = visible_rows(area);

    // Keep the cursor line at the same visual row while it moves
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    if cursor_line > 0 && cursor_line <= total_lines {
        scroll_state.offset = (cursor_line - 1).saturating_sub(target_row);
    }
    super::clamp_scroll(&mut scroll_state.offset, total_lines, visible_height);

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = line_num == cursor_line;
            let has_diagnostic = diagnostic_lines.contains(&line_num);

            let marker = if has_diagnostic { "!" } else { " " };
            let num_style = if has_diagnostic {
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD)
            } else if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content_line = highlight_source_code(line);
            if is_current {
                let current_style = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(current_style);
                }
            }

            let mut final_spans = vec![Span::styled(format!("{:4}{} ", line_num, marker), num_style)];
            final_spans.extend(content_line.spans);
            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line<'_>) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_words_and_numbers() {
        let line = highlight_source_code("float c = 1.23; // note");

        assert_eq!(
            texts(&line),
            ["float", " ", "c", " ", "=", " ", "1.23", ";", " ", "// note"]
        );
        assert_eq!(line.spans[0].style.fg, Some(DEFAULT_THEME.type_name));
        assert_eq!(line.spans[6].style.fg, Some(DEFAULT_THEME.number));
        assert_eq!(line.spans[9].style.fg, Some(DEFAULT_THEME.comment));
    }

    #[test]
    fn test_keyword_and_function_styles() {
        let line = highlight_source_code("int main() { return 0; }");

        assert_eq!(line.spans[2].content, "main");
        assert_eq!(line.spans[2].style.fg, Some(DEFAULT_THEME.function));
        let ret = line
            .spans
            .iter()
            .find(|s| s.content == "return")
            .expect("return span");
        assert_eq!(ret.style.fg, Some(DEFAULT_THEME.keyword));
    }
}
