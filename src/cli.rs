//! Command-line surface, reused verbatim for script option lines.
//!
//! Every option is optional so that a parsed [`Cli`] works as an overlay:
//! startup arguments build the first [`Config`](crate::config::Config)
//! snapshot, and each `-`-prefixed script line is re-parsed through
//! [`Cli::try_parse_from`] and layered on top of the running one.

use clap::Parser;
use std::path::PathBuf;

/// Stuff paced keystrokes into a terminal's input buffer.
#[derive(Parser, Debug, Clone)]
#[command(name = "stuffty", version, about)]
pub struct Cli {
    /// Bump the 'wait' timer by a random amount below this bound
    #[arg(short = 'b', long, value_name = "delay", value_parser = parse_millis)]
    pub bump: Option<u64>,

    /// Terminal to prompt on for confirmations
    #[arg(short = 'C', long, value_name = "tty")]
    pub confirm: Option<PathBuf>,

    /// Trace each decoded character on stderr
    #[arg(short = 'D', long)]
    pub debug: bool,

    /// Delay before each line-ending byte
    #[arg(short = 'e', long, value_name = "delay", value_parser = parse_millis)]
    pub end: Option<u64>,

    /// Ignore confirmation requests
    #[arg(short = 'F', long)]
    pub force: bool,

    /// Script file to read content from
    #[arg(short = 'f', long, value_name = "file")]
    pub file: Option<PathBuf>,

    /// Delay after each line-ending byte
    #[arg(short = 'l', long, value_name = "delay", value_parser = parse_millis)]
    pub line: Option<u64>,

    /// Do not stuff the input buffer; just echo the bytes
    #[arg(short = 'n', long = "dry-run")]
    pub dry_run: bool,

    /// Emit a message and wait for confirmation
    #[arg(short = 'P', long = "parse-confirm", value_name = "msg")]
    pub parse_confirm: Option<String>,

    /// Duration of a '\p' pause
    #[arg(short = 'p', long, value_name = "delay", value_parser = parse_millis)]
    pub pause: Option<u64>,

    /// Sleep immediately for the given period
    #[arg(short = 'S', long, value_name = "time", value_parser = parse_millis)]
    pub sleep: Option<u64>,

    /// Do not make output or perform delays
    #[arg(short = 's', long)]
    pub skip: bool,

    /// Emit a terminal capability ('clear' or 'home')
    #[arg(short = 'T', long, value_name = "capname")]
    pub tput: Option<String>,

    /// Terminal to push input data into
    #[arg(short = 't', long, value_name = "tty")]
    pub tty: Option<PathBuf>,

    /// Delay between injected characters
    #[arg(short = 'w', long, value_name = "delay", value_parser = parse_millis)]
    pub wait: Option<u64>,

    /// Strings to type, joined with single spaces
    #[arg(value_name = "strings", trailing_var_arg = true)]
    pub strings: Vec<String>,
}

/// Parse a time value into milliseconds: a decimal integer with an optional
/// unit suffix. Any prefix of "seconds", "milliseconds", "microseconds" or
/// "nanoseconds" is accepted ("5s", "100ms", "2sec"); sub-millisecond units
/// round down. Unknown suffixes are fatal at parse time.
pub fn parse_millis(s: &str) -> Result<u64, String> {
    let digits_end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    let (num, unit) = s.split_at(digits_end);
    let value: u64 = num
        .parse()
        .map_err(|_| format!("invalid time value: '{s}'"))?;

    match unit {
        "" => Ok(value),
        u if "seconds".starts_with(u) => Ok(value * 1000),
        u if "milliseconds".starts_with(u) || u == "ms" => Ok(value),
        u if "microseconds".starts_with(u) || u == "us" => Ok(value / 1000),
        u if "nanoseconds".starts_with(u) || u == "ns" => Ok(value / 1_000_000),
        u => Err(format!("unknown time unit: '{u}'")),
    }
}
