use std::time::Duration;

/// One step of decoded typing work, produced by the escape decoder and
/// consumed immediately by the session's pacer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Inject (or, in dry-run mode, write) a single byte.
    Byte(u8),

    /// Sleep for a fixed duration, regardless of skip or dry-run mode.
    Pause(Duration),

    /// Block until the operator acknowledges, optionally with a message.
    Confirm(Option<String>),
}

impl Event {
    /// Shorthand for a pause event from milliseconds.
    pub fn pause_ms(ms: u64) -> Self {
        Event::Pause(Duration::from_millis(ms))
    }
}
