//! xlog core library
//!
//! Thread-safe, leveled log sinks over plain byte writers.
//!
//! ## Overview
//!
//! A [`WriterSink`] accepts already-formatted log lines tagged with a
//! [`LogLevel`]. For every line it:
//!
//! - drops it if the level is below the sink's minimum
//! - colorizes the level token when the sink is named `"stdout"`
//! - appends a newline
//! - writes it under the sink's lock, so lines from different threads
//!   never interleave
//!
//! Delivery is best-effort: write failures are swallowed and only show up
//! in [`WriterSink::failed_writes`].
//!
//! ## Quick Start
//!
//! ```
//! use xlog_core::{LogLevel, Sink, WriterSink};
//!
//! let sink = WriterSink::new("memory", Vec::new(), LogLevel::Info);
//! sink.log(LogLevel::Debug, b"DEBUG dropped");
//! sink.log(LogLevel::Warn, b"WARN disk at 91%");
//!
//! assert_eq!(sink.into_inner(), b"WARN disk at 91%\n");
//! ```

pub mod config;
pub mod error;
pub mod level;
pub mod palette;
pub mod sink;

// Re-exports
pub use config::{SinkConfig, SinkTarget};
pub use error::{XlogError, XlogResult};
pub use level::LogLevel;
pub use palette::{Palette, DEBUG_COLOR, ERROR_COLOR, FATAL_COLOR, WARN_COLOR};
pub use sink::{NoopSink, Sink, WriterSink, STDOUT_NAME};
