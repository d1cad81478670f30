//! The injection sink: where typed bytes actually go.

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::fd::{AsRawFd, RawFd};
use std::path::Path;

/// Destination for decoded bytes.
///
/// `inject` places one byte into the target's pending-input buffer, as if it
/// had been typed; `write_raw` writes bytes to the target's output instead
/// (the dry-run path, and terminal capability strings).
pub trait Sink {
    fn inject(&mut self, byte: u8) -> Result<()>;
    fn write_raw(&mut self, data: &[u8]) -> Result<()>;
}

/// A terminal device sink: the process stdout by default, or a terminal
/// opened by name. Opening a new target replaces the old handle.
pub struct TtySink {
    target: Target,
}

enum Target {
    Stdout,
    Tty(File),
}

impl TtySink {
    /// Sink pointed at the process's own terminal (fd 1).
    pub fn stdout() -> Self {
        TtySink { target: Target::Stdout }
    }

    /// Open a terminal device for injection. A failed open is fatal to the
    /// caller; there is no retry.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .write(true)
            .open(path)
            .with_context(|| format!("cannot open terminal: '{}'", path.display()))?;
        Ok(TtySink { target: Target::Tty(file) })
    }

    fn fd(&self) -> RawFd {
        match &self.target {
            Target::Stdout => libc::STDOUT_FILENO,
            Target::Tty(file) => file.as_raw_fd(),
        }
    }
}

impl Sink for TtySink {
    fn inject(&mut self, byte: u8) -> Result<()> {
        // TIOCSTI stuffs one byte into the terminal's input queue.
        let rc = unsafe { libc::ioctl(self.fd(), libc::TIOCSTI, &byte as *const u8) };
        if rc < 0 {
            return Err(io::Error::last_os_error())
                .context("could not stuff byte into terminal input");
        }
        Ok(())
    }

    fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        match &mut self.target {
            Target::Stdout => {
                let mut out = io::stdout();
                out.write_all(data)?;
                out.flush()?;
            }
            Target::Tty(file) => {
                file.write_all(data)?;
                file.flush()?;
            }
        }
        Ok(())
    }
}

/// Fixed vt100 byte strings for the capability names the `-T` option
/// accepts. Unknown names yield `None` and are ignored by the caller.
pub(crate) fn capability(name: &str) -> Option<&'static [u8]> {
    match name {
        "clear" => Some(b"\x1b[H\x1b[2J\x1b[3J"),
        "home" => Some(b"\x1b[H"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_names() {
        assert_eq!(capability("home"), Some(&b"\x1b[H"[..]));
        assert_eq!(capability("clear"), Some(&b"\x1b[H\x1b[2J\x1b[3J"[..]));
        assert_eq!(capability("blink"), None);
    }

    #[test]
    fn test_open_missing_device_fails() {
        assert!(TtySink::open("/nonexistent/tty").is_err());
    }
}
