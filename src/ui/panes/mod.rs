//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the
//! explorer, one module per pane.
//!
//! # Pane Modules
//!
//! - [`source`]: Source code with keyword highlighting, diagnostic markers
//!   and the cursor line
//! - [`ast`]: The indented AST dump
//! - [`tokens`]: The token stream as a table
//! - [`diagnostics`]: All diagnostics, with the selected one highlighted
//! - [`status`]: Status bar with counts and keybindings
//!
//! Each pane module exports a `render_*` function. Scroll offsets are owned
//! by the app and clamped here at render time.

pub mod ast;
pub mod diagnostics;
pub mod source;
pub mod status;
pub mod tokens;

pub use ast::render_ast_pane;
pub use diagnostics::render_diagnostics_pane;
pub use source::{render_source_pane, SourceScrollState};
pub use status::{render_status_bar, StatusCounts};
pub use tokens::render_tokens_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders},
};

/// Bordered pane frame, highlighted when focused
fn pane_block(title: &str, is_focused: bool) -> Block<'_> {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style)
}

/// Rows available inside a bordered pane, at least one
fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(2).max(1) as usize
}

/// Clamp a scroll offset so the last page stays full
fn clamp_scroll(offset: &mut usize, total: usize, visible: usize) {
    if total > visible {
        *offset = (*offset).min(total - visible);
    } else {
        *offset = 0;
    }
}
