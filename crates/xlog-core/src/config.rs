//! Declarative sink configuration.
//!
//! A sink can be described as a small JSON document and built at startup:
//!
//! ```json
//! {
//!   "name": "stdout",
//!   "target": "stdout",
//!   "min_level": "debug",
//!   "colors": { "WARN": "\u001b[93mWARN\u001b[0m" }
//! }
//! ```
//!
//! `target` is `"stdout"`, `"stderr"` or `{ "file": "/var/log/app.log" }`.
//! When `name` is omitted the sink is named after its target, so a stdout
//! target colorizes by default.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{XlogError, XlogResult};
use crate::level::LogLevel;
use crate::palette::Palette;
use crate::sink::{Sink, WriterSink, STDOUT_NAME};

/// Where a configured sink writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkTarget {
    Stdout,
    Stderr,
    /// Append to a file, creating it (and its directory) if needed
    File(PathBuf),
}

impl SinkTarget {
    fn default_name(&self) -> String {
        match self {
            SinkTarget::Stdout => STDOUT_NAME.to_string(),
            SinkTarget::Stderr => "stderr".to_string(),
            SinkTarget::File(path) => path.display().to_string(),
        }
    }
}

fn default_min_level() -> LogLevel {
    LogLevel::Info
}

/// Settings for one sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SinkConfig {
    /// Sink name; `"stdout"` enables colorization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub target: SinkTarget,

    #[serde(default = "default_min_level")]
    pub min_level: LogLevel,

    /// Token -> color sequence overrides (e.g. `"WARN"`)
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub colors: BTreeMap<String, String>,
}

impl SinkConfig {
    /// Configuration for a target with default settings.
    pub fn new(target: SinkTarget) -> Self {
        Self {
            name: None,
            target,
            min_level: default_min_level(),
            colors: BTreeMap::new(),
        }
    }

    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> XlogResult<Self> {
        let config: SinkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> XlogResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Name the built sink will carry.
    pub fn sink_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.target.default_name())
    }

    /// Check the settings without opening anything.
    pub fn validate(&self) -> XlogResult<()> {
        if matches!(self.name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(XlogError::Config("sink name must not be empty".to_string()));
        }
        self.palette().map(|_| ())
    }

    /// Default ANSI palette with the configured overrides applied.
    pub fn palette(&self) -> XlogResult<Palette> {
        let mut palette = Palette::ansi();
        let mut seen: BTreeMap<LogLevel, &str> = BTreeMap::new();
        for (token, color) in &self.colors {
            let level: LogLevel = token
                .parse()
                .map_err(|_| XlogError::Config(format!("unknown color token: {}", token)))?;
            if let Some(first) = seen.insert(level, token) {
                return Err(XlogError::Config(format!(
                    "duplicate color token: {} and {} both name {}",
                    first, token, level
                )));
            }
            palette = palette.with_color(level, color.as_bytes())?;
        }
        Ok(palette)
    }

    /// Open the target and build the sink.
    pub fn build(&self) -> XlogResult<Box<dyn Sink>> {
        self.validate()?;
        let name = self.sink_name();
        let palette = self.palette()?;

        tracing::debug!(
            sink = %name,
            target = ?self.target,
            min_level = %self.min_level,
            "building sink"
        );

        let sink: Box<dyn Sink> = match &self.target {
            SinkTarget::Stdout => Box::new(WriterSink::with_palette(
                name,
                io::stdout(),
                self.min_level,
                palette,
            )),
            SinkTarget::Stderr => Box::new(WriterSink::with_palette(
                name,
                io::stderr(),
                self.min_level,
                palette,
            )),
            SinkTarget::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)?;
                }
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Box::new(WriterSink::with_palette(name, file, self.min_level, palette))
            }
        };

        Ok(sink)
    }
}
