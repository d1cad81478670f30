//! Blocking confirmation prompts (`\P` in a descriptor, `-P` on the
//! command line).

use anyhow::{Context as _, Result};
use async_trait::async_trait;
use std::path::Path;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Where confirmation prompts go and acknowledgments come from.
///
/// `confirm` writes a prompt containing `msg`, then performs one line read
/// and discards its content; it returns only once the operator has pressed
/// enter.
#[async_trait(?Send)]
pub trait ConfirmSource {
    async fn confirm(&mut self, msg: &str) -> Result<()>;
}

fn prompt(msg: &str) -> String {
    format!("[{msg}; press enter to continue]\n>>> ")
}

/// Prompts on the process's own stdout and reads from stdin.
pub struct StdioConfirm;

#[async_trait(?Send)]
impl ConfirmSource for StdioConfirm {
    async fn confirm(&mut self, msg: &str) -> Result<()> {
        let mut out = tokio::io::stdout();
        out.write_all(prompt(msg).as_bytes()).await?;
        out.flush().await?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin())
            .read_line(&mut line)
            .await?;
        Ok(())
    }
}

/// Prompts on a named terminal device, opened read+write (`-C`).
pub struct TtyConfirm {
    io: BufReader<tokio::fs::File>,
}

impl TtyConfirm {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .await
            .with_context(|| format!("could not open confirmation terminal: '{}'", path.display()))?;
        Ok(TtyConfirm { io: BufReader::new(file) })
    }
}

#[async_trait(?Send)]
impl ConfirmSource for TtyConfirm {
    async fn confirm(&mut self, msg: &str) -> Result<()> {
        self.io.get_mut().write_all(prompt(msg).as_bytes()).await?;
        self.io.get_mut().flush().await?;

        let mut line = String::new();
        self.io.read_line(&mut line).await?;
        Ok(())
    }
}
