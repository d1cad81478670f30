//! The typing session: paces decoded events into the injection sink and
//! runs scripts.

use crate::cli::Cli;
use crate::config::Config;
use crate::confirm::{ConfirmSource, StdioConfirm, TtyConfirm};
use crate::decode::Decoder;
use crate::event::Event;
use crate::script::{self, Line};
use crate::sink::{Sink, TtySink, capability};
use anyhow::{Context, Result, bail};
use clap::Parser;
use rand::Rng;
use std::path::Path;
use std::time::Duration;
use tokio::time::sleep;

/// A running typing session: the current [`Config`] snapshot, the injection
/// sink, and the confirmation source.
///
/// The whole pipeline is synchronous and single-threaded: every sleep and
/// confirmation read suspends the one control flow until it finishes.
pub struct Session {
    config: Config,
    sink: Box<dyn Sink>,
    confirm: Box<dyn ConfirmSource>,
}

impl Session {
    /// A session injecting into the process's own terminal and confirming on
    /// stdin/stdout.
    pub fn new(config: Config) -> Self {
        Session::with_parts(config, Box::new(TtySink::stdout()), Box::new(StdioConfirm))
    }

    /// A session with explicit sink and confirmation source.
    pub fn with_parts(
        config: Config,
        sink: Box<dyn Sink>,
        confirm: Box<dyn ConfirmSource>,
    ) -> Self {
        Session { config, sink, confirm }
    }

    /// The current configuration snapshot.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Layer a parsed option set onto the session: replace the config
    /// snapshot and carry out the option side effects (re-pointing the sink
    /// or confirmation source, immediate sleeps, capability output, and a
    /// `-P` confirmation).
    pub async fn apply(&mut self, cli: &Cli) -> Result<()> {
        self.config = self.config.overlay(cli);

        if let Some(path) = &cli.tty {
            self.sink = Box::new(TtySink::open(path)?);
        }
        if let Some(path) = &cli.confirm {
            self.confirm = Box::new(TtyConfirm::open(path).await?);
        }
        if let Some(ms) = cli.sleep {
            if ms > 0 {
                sleep(Duration::from_millis(ms)).await;
            }
        }
        if let Some(name) = &cli.tput {
            self.emit_capability(name).await?;
        }
        if let Some(msg) = &cli.parse_confirm {
            self.confirm.confirm(msg).await?;
        }
        Ok(())
    }

    /// Decode one descriptor string under the current snapshot and pace its
    /// events into the sink.
    pub async fn type_str(&mut self, text: &str) -> Result<()> {
        let snapshot = self.config.clone();
        for event in Decoder::new(text, &snapshot) {
            self.dispatch(event).await?;
        }
        Ok(())
    }

    /// Type command-line strings, joined by a single paced space byte.
    pub async fn type_args(&mut self, args: &[String]) -> Result<()> {
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.send_byte(b' ').await?;
            }
            self.type_str(arg).await?;
        }
        Ok(())
    }

    /// Run a script: classify each raw line, re-parse option lines through
    /// the regular CLI surface, and type data lines.
    pub async fn run_script(&mut self, content: &str) -> Result<()> {
        for raw in content.split_inclusive('\n') {
            match script::classify(raw) {
                Line::Comment => {}
                Line::Options(text) => {
                    let tokens = script::split_args(text);
                    let cli = Cli::try_parse_from(tokens.iter().map(String::as_str))
                        .map_err(|err| {
                            anyhow::anyhow!("bad option line '{}': {}", text, err)
                        })?;
                    if cli.file.is_some() {
                        bail!("file name is already provided");
                    }
                    self.apply(&cli).await?;
                }
                Line::Data { text, append_cr } => {
                    self.type_str(text).await?;
                    if append_cr {
                        self.send_byte(b'\r').await?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Read a script file and run it.
    pub async fn run_script_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("could not open file '{}'", path.display()))?;
        self.run_script(&content).await
    }

    async fn dispatch(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Byte(b) => self.send_byte(b).await,
            Event::Pause(d) => {
                sleep(d).await;
                Ok(())
            }
            Event::Confirm(msg) => {
                self.confirm.confirm(msg.as_deref().unwrap_or("paused")).await
            }
        }
    }

    /// Pace one byte into the sink: optional delay before a line ending,
    /// the emission itself, the per-byte wait plus jitter, and the optional
    /// delay after a line ending. In skip mode the byte is dropped and only
    /// the line-ending lead-in delay runs.
    async fn send_byte(&mut self, b: u8) -> Result<()> {
        if self.config.debug {
            eprint!("[char {b:#04x}]");
        }

        let line_ending = b == b'\r' || b == b'\n';
        if line_ending && !self.config.end.is_zero() {
            sleep(self.config.end).await;
        }

        if self.config.dry_run {
            self.sink.write_raw(&[b])?;
        } else if self.config.skip {
            return Ok(());
        } else {
            self.sink.inject(b)?;
        }

        if !self.config.wait.is_zero() {
            let bump_ms = self.config.bump.as_millis() as u64;
            let jitter = if bump_ms > 0 {
                rand::thread_rng().gen_range(0..bump_ms)
            } else {
                0
            };
            sleep(self.config.wait + Duration::from_millis(jitter)).await;
        }

        if line_ending && !self.config.line.is_zero() {
            sleep(self.config.line).await;
        }
        Ok(())
    }

    /// Emit a terminal capability string: written straight to the target,
    /// except in dry-run mode where each byte is paced like typed input.
    async fn emit_capability(&mut self, name: &str) -> Result<()> {
        let Some(bytes) = capability(name) else {
            return Ok(());
        };
        if self.config.dry_run {
            for &b in bytes {
                self.send_byte(b).await?;
            }
        } else {
            self.sink.write_raw(bytes)?;
        }
        Ok(())
    }
}
