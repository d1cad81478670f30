//! The timing and mode settings a session runs under.

use crate::cli::Cli;
use std::time::Duration;

/// Snapshot of the pacing parameters and mode flags.
///
/// A `Config` is never mutated in place: startup options and each script
/// option line produce a fresh snapshot via [`Config::overlay`], and the
/// decoder and pacer receive the current snapshot explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Delay after every injected byte.
    pub wait: Duration,
    /// Exclusive upper bound for random jitter added to `wait`, per byte.
    pub bump: Duration,
    /// Delay after a CR/LF byte is injected.
    pub line: Duration,
    /// Delay before a CR/LF byte is injected.
    pub end: Duration,
    /// Duration of a `\p` pause.
    pub pause: Duration,
    /// Skip `\P` confirmation requests.
    pub force: bool,
    /// Write bytes to the target instead of stuffing its input buffer.
    pub dry_run: bool,
    /// Drop bytes entirely; only `\p` pauses still run.
    pub skip: bool,
    /// Trace decoded characters on stderr.
    pub debug: bool,
}

impl Config {
    /// Return a new snapshot with `cli`'s settings layered on top of this one.
    ///
    /// Duration options replace the current value when given and leave it
    /// untouched when absent. Mode flags toggle, so a script option line can
    /// switch a flag off again (`-D ... -D`).
    pub fn overlay(&self, cli: &Cli) -> Config {
        let mut next = self.clone();
        if let Some(ms) = cli.wait {
            next.wait = Duration::from_millis(ms);
        }
        if let Some(ms) = cli.bump {
            next.bump = Duration::from_millis(ms);
        }
        if let Some(ms) = cli.line {
            next.line = Duration::from_millis(ms);
        }
        if let Some(ms) = cli.end {
            next.end = Duration::from_millis(ms);
        }
        if let Some(ms) = cli.pause {
            next.pause = Duration::from_millis(ms);
        }
        if cli.force {
            next.force = !next.force;
        }
        if cli.dry_run {
            next.dry_run = !next.dry_run;
        }
        if cli.skip {
            next.skip = !next.skip;
        }
        if cli.debug {
            next.debug = !next.debug;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["stuffty"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_overlay_replaces_given_durations() {
        let base = Config::default();
        let next = base.overlay(&cli(&["-w", "100", "-b", "40"]));
        assert_eq!(next.wait, Duration::from_millis(100));
        assert_eq!(next.bump, Duration::from_millis(40));
        assert_eq!(next.pause, Duration::ZERO);
    }

    #[test]
    fn test_overlay_keeps_absent_fields() {
        let base = Config {
            wait: Duration::from_millis(50),
            pause: Duration::from_millis(1000),
            ..Config::default()
        };
        let next = base.overlay(&cli(&["-l", "200"]));
        assert_eq!(next.wait, Duration::from_millis(50));
        assert_eq!(next.pause, Duration::from_millis(1000));
        assert_eq!(next.line, Duration::from_millis(200));
    }

    #[test]
    fn test_overlay_toggles_flags() {
        let base = Config::default();
        let on = base.overlay(&cli(&["-D", "-F"]));
        assert!(on.debug);
        assert!(on.force);
        let off = on.overlay(&cli(&["-D"]));
        assert!(!off.debug);
        assert!(off.force);
    }

    #[test]
    fn test_overlay_does_not_mutate_base() {
        let base = Config::default();
        let _ = base.overlay(&cli(&["-w", "100", "-n"]));
        assert_eq!(base, Config::default());
    }
}
