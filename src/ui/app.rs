//! Main TUI application state and logic

use crate::pipeline::FrontendOutput;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use super::panes::{self, SourceScrollState, StatusCounts};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Diagnostics,
    Ast,
    Tokens,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> diagnostics -> ast -> tokens)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Diagnostics,
            FocusedPane::Diagnostics => FocusedPane::Ast,
            FocusedPane::Ast => FocusedPane::Tokens,
            FocusedPane::Tokens => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tokens,
            FocusedPane::Diagnostics => FocusedPane::Source,
            FocusedPane::Ast => FocusedPane::Diagnostics,
            FocusedPane::Tokens => FocusedPane::Ast,
        }
    }
}

/// The main application state
pub struct App<'a> {
    /// Name shown in the status bar
    file_name: String,

    /// The source code being explored
    source_code: &'a str,

    /// Everything the front end produced for it
    output: &'a FrontendOutput<'a>,

    /// Pre-rendered AST dump, one entry per line
    ast_lines: Vec<String>,

    /// Lines that carry at least one diagnostic
    diagnostic_lines: Vec<usize>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// 1-based line highlighted in the source pane
    pub cursor_line: usize,

    /// Index into the diagnostics list
    pub selected_diagnostic: usize,

    /// Per-pane scroll offsets
    pub source_scroll: SourceScrollState,
    pub diagnostics_scroll: usize,
    pub ast_scroll: usize,
    pub tokens_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl<'a> App<'a> {
    /// Create a new app over a source buffer and the front end's output for it
    pub fn new(
        file_name: impl Into<String>,
        source_code: &'a str,
        output: &'a FrontendOutput<'a>,
    ) -> Self {
        let ast_lines = output.unit().dump().lines().map(String::from).collect();

        let mut diagnostic_lines: Vec<usize> = output
            .diagnostics()
            .iter()
            .map(|diag| diag.location().line)
            .collect();
        diagnostic_lines.sort_unstable();
        diagnostic_lines.dedup();

        let mut app = App {
            file_name: file_name.into(),
            source_code,
            output,
            ast_lines,
            diagnostic_lines,
            focused_pane: FocusedPane::Source,
            cursor_line: 1,
            selected_diagnostic: 0,
            source_scroll: SourceScrollState::default(),
            diagnostics_scroll: 0,
            ast_scroll: 0,
            tokens_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        };

        if !output.diagnostics().is_empty() {
            app.focused_pane = FocusedPane::Diagnostics;
            app.jump_to_selected_diagnostic();
        }
        app
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Source (top) | Diagnostics (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(columns[0]);

        // Right column: AST (top) | Tokens (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[1]);

        panes::render_source_pane(
            frame,
            left_rows[0],
            self.source_code,
            self.cursor_line,
            &self.diagnostic_lines,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_diagnostics_pane(
            frame,
            left_rows[1],
            self.output.diagnostics(),
            self.selected_diagnostic,
            self.focused_pane == FocusedPane::Diagnostics,
            &mut self.diagnostics_scroll,
        );

        panes::render_ast_pane(
            frame,
            right_rows[0],
            &self.ast_lines,
            self.focused_pane == FocusedPane::Ast,
            &mut self.ast_scroll,
        );

        panes::render_tokens_pane(
            frame,
            right_rows[1],
            self.output.tokens(),
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.file_name,
            &self.status_message,
            StatusCounts {
                tokens: self.output.tokens().len(),
                items: self.output.unit().items.len(),
                diagnostics: self.output.diagnostics().len(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => self.move_cursor(-1),
            KeyCode::Down => self.move_cursor(1),
            KeyCode::PageUp => self.move_cursor(-10),
            KeyCode::PageDown => self.move_cursor(10),
            KeyCode::Enter => {
                if self.focused_pane == FocusedPane::Diagnostics {
                    self.jump_to_selected_diagnostic();
                    self.focused_pane = FocusedPane::Source;
                }
            }
            _ => {}
        }
    }

    /// Move within the focused pane. Offsets may overshoot here; panes clamp
    /// them when rendering.
    fn move_cursor(&mut self, delta: isize) {
        match self.focused_pane {
            FocusedPane::Source => {
                let total = self.source_code.lines().count().max(1);
                self.cursor_line = self.cursor_line.saturating_add_signed(delta).clamp(1, total);
                self.status_message = format!("Line {}", self.cursor_line);
            }
            FocusedPane::Diagnostics => {
                let count = self.output.diagnostics().len();
                if count > 0 {
                    self.selected_diagnostic = self
                        .selected_diagnostic
                        .saturating_add_signed(delta)
                        .min(count - 1);
                    self.jump_to_selected_diagnostic();
                }
            }
            FocusedPane::Ast => {
                self.ast_scroll = self.ast_scroll.saturating_add_signed(delta);
            }
            FocusedPane::Tokens => {
                self.tokens_scroll = self.tokens_scroll.saturating_add_signed(delta);
            }
        }
    }

    /// Put the source cursor on the selected diagnostic's line
    fn jump_to_selected_diagnostic(&mut self) {
        if let Some(diag) = self.output.diagnostics().get(self.selected_diagnostic) {
            let location = diag.location();
            self.cursor_line = location.line.max(1);
            self.status_message = format!(
                "{}/{} {} error at {}",
                self.selected_diagnostic + 1,
                self.output.diagnostics().len(),
                diag.stage(),
                location
            );
        }
    }
}
