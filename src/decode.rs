//! Escape decoder: turns one descriptor string into a stream of [`Event`]s.
//!
//! The grammar is the backslash mini-language typed strings and script data
//! lines share:
//!
//! | Unit | Effect |
//! |------|--------|
//! | `\a` `\b` `\e` `\f` `\n` `\r` `\t` | the matching control byte |
//! | `\p` | pause for the configured duration |
//! | `\P` | wait for confirmation (skipped under `--force`) |
//! | `\u{1F600}` | a Unicode code point, emitted as UTF-8 bytes |
//! | `\x{48 65 78}` | raw hex byte pairs, up to the first non-pair |
//! | `\x1b` | one raw hex byte |
//! | `\^G` | caret-notation control character |
//! | `\c` (anything else) | the literal character |
//!
//! Decoding never fails: malformed hex units are dropped and scanning
//! resumes, an out-of-range code point degrades to its low seven bits, and a
//! trailing bare backslash simply ends the stream.

use crate::config::Config;
use crate::event::Event;
use std::collections::VecDeque;
use std::time::Duration;

/// Lazy, single-pass decoder over a descriptor string.
///
/// Construct one per string with the current [`Config`] snapshot; the
/// snapshot fixes the `\p` duration and whether `\P` is honored for the
/// whole pass.
pub struct Decoder<'a> {
    input: &'a [u8],
    pos: usize,
    queued: VecDeque<u8>,
    pause: Duration,
    force: bool,
    debug: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(text: &'a str, config: &Config) -> Self {
        Decoder {
            input: text.as_bytes(),
            pos: 0,
            queued: VecDeque::new(),
            pause: config.pause,
            force: config.force,
            debug: config.debug,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// `\u{HEX}`: returns the code point, or `None` for a malformed unit.
    ///
    /// On failure the scanned digits and the offending terminator character
    /// are consumed, so scanning resumes past them.
    fn take_codepoint(&mut self) -> Option<u32> {
        if self.peek() != Some(b'{') {
            return None;
        }
        let start = self.pos + 1;
        let mut end = start;
        while self
            .input
            .get(end)
            .is_some_and(|b| b.is_ascii_hexdigit())
        {
            end += 1;
        }
        let closed = self.input.get(end) == Some(&b'}');
        self.pos = (end + 1).min(self.input.len());
        if !closed || end == start {
            return None;
        }
        let digits = std::str::from_utf8(&self.input[start..end]).ok()?;
        u32::from_str_radix(digits, 16).ok()
    }

    /// `\xHH` and `\x{HH HH ...}`: queues the decoded bytes.
    ///
    /// Braced groups stop at the first pair that is not two hex digits; the
    /// character after the last pair (the `}` in well-formed input) is
    /// consumed. An unbraced `\x` without two hex digits queues nothing.
    fn take_hex_bytes(&mut self) {
        let pair = |a: Option<u8>, b: Option<u8>| -> Option<u8> {
            match (a, b) {
                (Some(hi), Some(lo))
                    if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() =>
                {
                    Some(hex_val(hi) << 4 | hex_val(lo))
                }
                _ => None,
            }
        };

        if self.peek() == Some(b'{') {
            self.pos += 1;
            while let Some(b) = pair(
                self.input.get(self.pos).copied(),
                self.input.get(self.pos + 1).copied(),
            ) {
                self.queued.push_back(b);
                self.pos += 2;
            }
            if self.pos < self.input.len() {
                self.pos += 1;
            }
        } else if let Some(b) = pair(
            self.input.get(self.pos).copied(),
            self.input.get(self.pos + 1).copied(),
        ) {
            self.queued.push_back(b);
            self.pos += 2;
        }
    }

    /// `\^X`: caret-notation control character.
    fn take_caret(&mut self) -> Option<u8> {
        let c = self.peek()?;
        self.pos += 1;
        let val = match c {
            b'A'..=b'Z' => c - b'A' + 1,
            b'a'..=b'z' => c - b'a' + 1,
            b'[' => 0x1b,  // Escape
            b'\\' => 0x1c, // File separator
            b']' => 0x1d,  // Group separator
            b'^' => 0x1e,  // Record separator
            b'_' => 0x1f,  // Unit separator
            b'?' => 0x7f,  // Delete
            b'@' => 0x00,  // NUL
            _ => b' ',
        };
        Some(val)
    }

    fn queue_codepoint(&mut self, cp: u32) {
        if self.debug {
            eprint!("[wide {cp:#06x}]");
        }
        for b in encode_codepoint(cp) {
            self.queued.push_back(b);
        }
    }
}

impl Iterator for Decoder<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            if let Some(b) = self.queued.pop_front() {
                return Some(Event::Byte(b));
            }

            let b = self.peek()?;
            self.pos += 1;
            if b != b'\\' {
                return Some(Event::Byte(b));
            }

            // A bare backslash at the end of input truncates decoding.
            let Some(esc) = self.peek() else {
                return None;
            };
            self.pos += 1;

            match esc {
                b'a' => return Some(Event::Byte(0x07)),
                b'b' => return Some(Event::Byte(0x08)),
                b'e' => return Some(Event::Byte(0x1b)),
                b'f' => return Some(Event::Byte(0x0c)),
                b'n' => return Some(Event::Byte(b'\n')),
                b'r' => return Some(Event::Byte(b'\r')),
                b't' => return Some(Event::Byte(b'\t')),
                b'p' => return Some(Event::Pause(self.pause)),
                b'P' => {
                    if !self.force {
                        return Some(Event::Confirm(None));
                    }
                }
                b'u' => {
                    if let Some(cp) = self.take_codepoint() {
                        self.queue_codepoint(cp);
                    }
                }
                b'x' => self.take_hex_bytes(),
                b'^' => {
                    if let Some(val) = self.take_caret() {
                        return Some(Event::Byte(val));
                    }
                }
                other => return Some(Event::Byte(other)),
            }
        }
    }
}

fn hex_val(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

/// Encode a code point as its canonical UTF-8 byte sequence.
///
/// The length class is the smallest range holding the value (1 byte up to
/// 0x7F, 2 up to 0x7FF, 3 up to 0xFFFF, 4 up to 0x1FFFFF). Values outside
/// the 21-bit range degrade to their low seven bits.
pub fn encode_codepoint(cp: u32) -> Vec<u8> {
    match cp {
        0..=0x7f => vec![cp as u8],
        0x80..=0x7ff => vec![0xc0 | (cp >> 6) as u8, 0x80 | (cp & 0x3f) as u8],
        0x800..=0xffff => vec![
            0xe0 | (cp >> 12) as u8,
            0x80 | ((cp >> 6) & 0x3f) as u8,
            0x80 | (cp & 0x3f) as u8,
        ],
        0x1_0000..=0x1f_ffff => vec![
            0xf0 | (cp >> 18) as u8,
            0x80 | ((cp >> 12) & 0x3f) as u8,
            0x80 | ((cp >> 6) & 0x3f) as u8,
            0x80 | (cp & 0x3f) as u8,
        ],
        _ => vec![(cp & 0x7f) as u8],
    }
}
