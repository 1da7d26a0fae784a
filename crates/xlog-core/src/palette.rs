//! Color sequences applied to level tokens on terminal sinks.
//!
//! A [`Palette`] maps the four colorized tokens to the bytes that replace
//! them. Entries keep a fixed priority order (WARN, ERROR, FATAL, DEBUG):
//! when a payload carries several tokens, only the first one in that order
//! is colorized.

use std::borrow::Cow;

use crate::error::{XlogError, XlogResult};
use crate::level::LogLevel;

/// `WARN` in yellow.
pub const WARN_COLOR: &[u8] = b"\x1b[33mWARN\x1b[0m";
/// `ERROR` in red.
pub const ERROR_COLOR: &[u8] = b"\x1b[31mERROR\x1b[0m";
/// `FATAL` in magenta.
pub const FATAL_COLOR: &[u8] = b"\x1b[35mFATAL\x1b[0m";
/// `DEBUG` in cyan.
pub const DEBUG_COLOR: &[u8] = b"\x1b[36mDEBUG\x1b[0m";

/// Token -> replacement bytes, in colorize priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<(LogLevel, Vec<u8>)>,
}

impl Palette {
    /// Standard ANSI palette.
    pub fn ansi() -> Self {
        Self {
            entries: vec![
                (LogLevel::Warn, WARN_COLOR.to_vec()),
                (LogLevel::Error, ERROR_COLOR.to_vec()),
                (LogLevel::Fatal, FATAL_COLOR.to_vec()),
                (LogLevel::Debug, DEBUG_COLOR.to_vec()),
            ],
        }
    }

    /// Replace the sequence used for one token, keeping its priority slot.
    ///
    /// `INFO` is never colorized, so asking for it is a config error.
    pub fn with_color(mut self, level: LogLevel, color: impl Into<Vec<u8>>) -> XlogResult<Self> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(l, _)| *l == level)
            .ok_or_else(|| XlogError::Config(format!("{} has no color slot", level)))?;
        slot.1 = color.into();
        Ok(self)
    }

    /// Bytes that replace `level`'s token, if it is colorized.
    pub fn color(&self, level: LogLevel) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, c)| c.as_slice())
    }

    /// Colorize the first matching token category in `payload`.
    ///
    /// Every occurrence of that one token is replaced; tokens of other
    /// categories are left as they are. Payloads with no token are borrowed.
    pub fn colorize<'a>(&self, payload: &'a [u8]) -> Cow<'a, [u8]> {
        for (level, color) in &self.entries {
            let token = level.token().as_bytes();
            if contains(payload, token) {
                return Cow::Owned(replace_all(payload, token, color));
            }
        }
        Cow::Borrowed(payload)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::ansi()
    }
}

/// Byte offset of the first `needle` in `haystack`.
pub(crate) fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

pub(crate) fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    find(haystack, needle).is_some()
}

/// Replace non-overlapping occurrences of `from`, scanning left to right.
fn replace_all(haystack: &[u8], from: &[u8], to: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len() + to.len());
    let mut rest = haystack;
    while let Some(at) = find(rest, from) {
        out.extend_from_slice(&rest[..at]);
        out.extend_from_slice(to);
        rest = &rest[at + from.len()..];
    }
    out.extend_from_slice(rest);
    out
}
