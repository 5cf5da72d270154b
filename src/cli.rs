//! Command-line arguments and plain-text output of the driver

use clap::Parser;
use log::LevelFilter;
use std::io::{self, Write};
use std::path::PathBuf;
use sysyc::parser::token::Token;
use sysyc::parser::DEFAULT_MAX_NESTING_DEPTH;

/// SysY compiler front end
///
/// Lexes, parses and scope-checks a SysY source file and reports every
/// diagnostic found. Exits with status 1 when there is any diagnostic and
/// 2 when the input cannot be read.
#[derive(Parser, Debug)]
#[command(name = "sysyc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SysY source file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Print the token table
    #[arg(long)]
    pub tokens: bool,

    /// Print the AST dump
    #[arg(long)]
    pub ast: bool,

    /// Open the terminal explorer
    #[arg(long)]
    pub explore: bool,

    /// Deepest statement or expression nesting the parser accepts
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    pub max_depth: usize,

    /// Log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Write one row per token: kind, text, position
pub fn write_token_table(out: &mut impl Write, tokens: &[Token<'_>]) -> io::Result<()> {
    writeln!(out, "{:<15}{:<15}Location", "TokenKind", "Text")?;
    writeln!(out, "{}", "-".repeat(45))?;
    for token in tokens {
        writeln!(
            out,
            "{:<15}{:<15}Line {}, Col {}",
            token.kind.name(),
            token.text,
            token.location.line,
            token.location.column
        )?;
    }
    Ok(())
}
