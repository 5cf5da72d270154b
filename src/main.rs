// sysyc: SysY front end with a terminal explorer for tokens, AST and diagnostics

mod cli;

use std::fs;
use std::io;
use std::process::ExitCode;

use clap::Parser as _;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};

use cli::Cli;
use sysyc::pipeline::{Frontend, FrontendOptions, FrontendOutput};
use sysyc::ui::App;

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> io::Result<ExitCode> {
    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("Error: cannot read '{}': {}", cli.input.display(), err);
            return Ok(ExitCode::from(2));
        }
    };

    info!("compiling {}", cli.input.display());
    let frontend = Frontend::with_options(FrontendOptions {
        max_nesting_depth: cli.max_depth,
    });
    let output = frontend.run(&source);

    if cli.explore {
        explore(cli, &source, &output)?;
    } else {
        let mut stdout = io::stdout().lock();
        if cli.tokens {
            cli::write_token_table(&mut stdout, output.tokens())?;
        }
        if cli.ast {
            io::Write::write_all(&mut stdout, output.unit().dump().as_bytes())?;
        }
    }

    for diagnostic in output.diagnostics() {
        eprintln!("{}: {}", cli.input.display(), diagnostic);
    }

    if output.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!(
            "{} diagnostic(s) in {}",
            output.diagnostics().len(),
            cli.input.display()
        );
        Ok(ExitCode::from(1))
    }
}

fn explore(cli: &Cli, source: &str, output: &FrontendOutput<'_>) -> io::Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(cli.input.display().to_string(), source, output);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}
