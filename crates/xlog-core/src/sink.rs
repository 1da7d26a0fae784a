//! Sinks: destinations for leveled log lines.
//!
//! [`WriterSink`] wraps any [`std::io::Write`] behind a mutex. Each call to
//! [`Sink::log`] filters by minimum level, colorizes level tokens when the
//! sink is named `"stdout"`, appends a newline, then writes the whole line
//! while holding the lock so concurrent lines never interleave.
//!
//! Logging is best-effort. A failed write is dropped and counted, never
//! reported to the caller.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::level::LogLevel;
use crate::palette::Palette;

/// Sink name that turns on colorization.
pub const STDOUT_NAME: &str = "stdout";

/// A destination for log lines, safe to share between threads.
pub trait Sink: Send + Sync {
    /// Log to the sink. Best effort: write errors are not reported.
    fn log(&self, level: LogLevel, payload: &[u8]);
}

impl<S: Sink + ?Sized> Sink for Arc<S> {
    fn log(&self, level: LogLevel, payload: &[u8]) {
        (**self).log(level, payload)
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn log(&self, level: LogLevel, payload: &[u8]) {
        (**self).log(level, payload)
    }
}

impl<S: Sink + ?Sized> Sink for &S {
    fn log(&self, level: LogLevel, payload: &[u8]) {
        (**self).log(level, payload)
    }
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl Sink for NoopSink {
    #[inline]
    fn log(&self, _level: LogLevel, _payload: &[u8]) {}
}

/// Sink over a caller-supplied byte writer.
///
/// Configuration is fixed at construction. The sink never closes or flushes
/// the writer; dropping the sink just drops it. Use [`into_inner`] to take
/// the writer back.
///
/// [`into_inner`]: WriterSink::into_inner
pub struct WriterSink<W> {
    name: String,
    min_level: LogLevel,
    palette: Palette,
    writer: Mutex<W>,
    /// Writes that failed and were dropped
    failed_writes: AtomicU64,
}

impl<W: Write + Send> WriterSink<W> {
    /// Create a sink with the standard ANSI palette.
    pub fn new(name: impl Into<String>, writer: W, min_level: LogLevel) -> Self {
        Self::with_palette(name, writer, min_level, Palette::ansi())
    }

    /// Create a sink with explicit color sequences.
    ///
    /// The palette is only consulted when `name` is `"stdout"`.
    pub fn with_palette(
        name: impl Into<String>,
        writer: W,
        min_level: LogLevel,
        palette: Palette,
    ) -> Self {
        Self {
            name: name.into(),
            min_level,
            palette,
            writer: Mutex::new(writer),
            failed_writes: AtomicU64::new(0),
        }
    }

    /// Get the sink name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the minimum level that reaches the writer.
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    /// Get the color sequences used when colorizing.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Whether level tokens get colorized on this sink.
    pub fn colorizes(&self) -> bool {
        self.name == STDOUT_NAME
    }

    /// Number of lines dropped because the writer returned an error.
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Bytes that `log` would write for a payload that passes the filter.
    fn render(&self, payload: &[u8]) -> Vec<u8> {
        let mut line = if self.colorizes() {
            self.palette.colorize(payload).into_owned()
        } else {
            payload.to_vec()
        };
        line.push(b'\n');
        line
    }
}

impl WriterSink<io::Stdout> {
    /// Colorizing sink on the process's standard output.
    pub fn stdout(min_level: LogLevel) -> Self {
        Self::new(STDOUT_NAME, io::stdout(), min_level)
    }
}

impl WriterSink<io::Stderr> {
    /// Plain sink on the process's standard error.
    pub fn stderr(min_level: LogLevel) -> Self {
        Self::new("stderr", io::stderr(), min_level)
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn log(&self, level: LogLevel, payload: &[u8]) {
        if level < self.min_level {
            return;
        }

        let line = self.render(payload);

        // The guard lives only for this statement.
        let result = self.writer.lock().write_all(&line);

        // Dropped on purpose: callers of `log` have no error channel.
        if let Err(err) = result {
            self.failed_writes.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(sink = %self.name, error = %err, "dropped log line");
        }
    }
}

impl<W> std::fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WriterSink")
            .field("name", &self.name)
            .field("min_level", &self.min_level)
            .field("failed_writes", &self.failed_writes.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
