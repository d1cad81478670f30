//! # Stuffty
//!
//! Simulates human typing by stuffing paced keystrokes into a terminal's
//! input buffer.
//!
//! Stuffty decodes descriptor strings (command-line arguments or script
//! data lines) into individual bytes and injects them into a terminal's
//! pending input as if they had been typed, with configurable delays
//! between characters and lines, random per-character jitter, explicit
//! pauses, and interactive confirmation points. It is useful for recording
//! terminal demos and driving interactive programs at a human pace.
//!
//! ## Quick start
//!
//! ```no_run
//! use clap::Parser;
//! use stuffty::{Cli, Config, Session};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let mut session = Session::new(Config::default());
//!     let cli = Cli::try_parse_from(["stuffty", "--wait", "40", "--bump", "25"])?;
//!     session.apply(&cli).await?;
//!     session.type_str("echo hello, world").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Descriptor escapes
//!
//! | Escape | Meaning |
//! |--------|---------|
//! | `\a` `\b` `\e` `\f` `\n` `\r` `\t` | the usual control characters |
//! | `\p` | pause for the configured `--pause` duration |
//! | `\P` | stop and wait for the operator to press enter |
//! | `\u{1F600}` | a Unicode code point, typed as UTF-8 |
//! | `\x{1b 5b 48}` / `\x1b` | raw bytes in hex |
//! | `\^G` | caret-notation control character |
//!
//! Anything else after a backslash is typed literally.
//!
//! ## Script files
//!
//! A script (`--file`) is processed line by line: lines starting with `#`
//! are comments, lines starting with `-` re-run the option parser so the
//! pacing can change mid-script, and every other line is typed followed by
//! a carriage return. End a line with `\` to suppress the return, and start
//! it with `\` to type a line that would otherwise look like a comment or
//! an option line.
//!
//! ```text
//! # slow down and type a command
//! -w 100 -b 50
//! ls -l
//! # wait for the operator before the scary part
//! -P "about to remove things"
//! rm -i junk.txt
//! ```

pub mod cli;
pub mod config;
pub mod confirm;
pub mod decode;
pub mod event;
pub mod script;
pub mod session;
pub mod sink;

pub use cli::Cli;
pub use config::Config;
pub use confirm::{ConfirmSource, StdioConfirm, TtyConfirm};
pub use decode::{Decoder, encode_codepoint};
pub use event::Event;
pub use script::{Line, classify, split_args};
pub use session::Session;
pub use sink::{Sink, TtySink};
