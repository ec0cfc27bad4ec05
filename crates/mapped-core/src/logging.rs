//! Subscriber setup for hosts that want the engine's diagnostics.
//!
//! The engine itself only emits events: an `error` under the
//! `mapped_types` target whenever metadata cannot be inherited or
//! registered, and one `debug` span plus summary event per derivation.
//! Installing a subscriber is the host application's call; this module
//! offers a ready-made one.
//!
//! # Usage
//!
//! ```ignore
//! use mapped_core::logging::{init_logging, LogConfig};
//!
//! let config = LogConfig::from_verbosity(2).with_derivation_timings(true);
//! init_logging(&config)?;
//! ```

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::LOG_TARGET;

/// Targets that follow [`LogConfig::level`].
const ENGINE_TARGETS: [&str; 4] = [LOG_TARGET, "mapped_core", "mapped_model", "mapped_registry"];

#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Level for the engine's own targets.
    pub level: Level,
    /// Level for every other target.
    pub dependency_level: Level,
    pub format: LogFormat,
    pub with_timestamps: bool,
    pub with_target: bool,
    /// Ignored when writing to a file.
    pub with_ansi: bool,
    /// Emit an event with the elapsed time whenever a derivation span closes.
    pub derivation_timings: bool,
    /// Append to this file instead of writing to stderr.
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-field human-readable lines.
    Full,
    /// One short line per event.
    #[default]
    Compact,
    /// Newline-delimited JSON.
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            dependency_level: Level::WARN,
            format: LogFormat::default(),
            with_timestamps: true,
            with_target: true,
            with_ansi: true,
            derivation_timings: false,
            log_file: None,
        }
    }
}

impl LogConfig {
    /// Map a `-v` count onto the engine level: 0 warn, 1 info, 2 debug,
    /// 3 and above trace. Other targets stay at warn.
    #[must_use]
    pub fn from_verbosity(verbosity: u8) -> Self {
        let level = match verbosity {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        };
        Self {
            level,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_dependency_level(mut self, level: Level) -> Self {
        self.dependency_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.with_timestamps = enable;
        self
    }

    #[must_use]
    pub fn with_target(mut self, enable: bool) -> Self {
        self.with_target = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_derivation_timings(mut self, enable: bool) -> Self {
        self.derivation_timings = enable;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }

    /// Filter directives used when `RUST_LOG` is not set.
    pub fn directives(&self) -> String {
        let engine = self.level.as_str().to_lowercase();
        let mut directives = vec![self.dependency_level.as_str().to_lowercase()];
        directives.extend(
            ENGINE_TARGETS
                .iter()
                .map(|target| format!("{target}={engine}")),
        );
        directives.join(",")
    }
}

/// Install the global subscriber described by `config`.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a global subscriber is
/// already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            let config = config.clone().with_ansi(false);
            init_logging_with_writer(&config, Arc::new(file))
        }
        None => init_logging_with_writer(config, io::stderr),
    }
}

/// Install the global subscriber, writing through `writer`.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(format_layer(config, writer))
        .with(env_filter(config))
        .try_init()
        .context("installing the global tracing subscriber")
}

fn format_layer<S, W>(config: &LogConfig, writer: W) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let span_events = if config.derivation_timings {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    let layer = fmt::layer()
        .with_writer(writer)
        .with_target(config.with_target)
        .with_span_events(span_events);

    match (config.format, config.with_timestamps) {
        (LogFormat::Json, _) => layer.json().boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.with_ansi).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .with_ansi(config.with_ansi)
            .without_time()
            .boxed(),
        (LogFormat::Full, true) => layer.with_ansi(config.with_ansi).boxed(),
        (LogFormat::Full, false) => layer.with_ansi(config.with_ansi).without_time().boxed(),
    }
}

/// `RUST_LOG` when set and valid, otherwise [`LogConfig::directives`].
fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.directives()))
}
