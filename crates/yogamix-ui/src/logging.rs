//! Structured logging for the page.
//!
//! Events from `yogamix_core` and this crate go through a `tracing`
//! subscriber whose writer is the browser console. Each formatted event is
//! buffered and emitted as one console call at the level it was recorded
//! with, so the browser's level filter keeps working.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::{self, MakeWriter, format::FmtSpan};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Crates whose events are shown at the configured level.
const OWN_TARGETS: [&str; 2] = ["yogamix_core", "yogamix_ui"];

/// Logging configuration options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Maximum level for our own crates.
    pub level: Level,
    /// Maximum level for everything else.
    pub dependency_level: Level,
    /// Whether to include the target module in each line.
    pub include_target: bool,
    /// Whether to include file/line info in each line.
    pub include_file_line: bool,
    /// Whether to log span events (enter/exit).
    pub log_span_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LoggingConfig {
    /// Verbose configuration for debug builds.
    #[must_use]
    pub const fn development() -> Self {
        Self {
            level: Level::DEBUG,
            dependency_level: Level::INFO,
            include_target: true,
            include_file_line: true,
            log_span_events: true,
        }
    }

    /// Quiet configuration for release builds.
    #[must_use]
    pub const fn production() -> Self {
        Self {
            level: Level::INFO,
            dependency_level: Level::WARN,
            include_target: false,
            include_file_line: false,
            log_span_events: false,
        }
    }

    /// Detect configuration based on build type.
    #[must_use]
    pub const fn auto() -> Self {
        if cfg!(debug_assertions) {
            Self::development()
        } else {
            Self::production()
        }
    }

    /// Set the level for our own crates.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the level for dependencies.
    #[must_use]
    pub const fn with_dependency_level(mut self, level: Level) -> Self {
        self.dependency_level = level;
        self
    }

    /// Toggle the target module prefix.
    #[must_use]
    pub const fn with_target(mut self, include_target: bool) -> Self {
        self.include_target = include_target;
        self
    }

    /// Filter directives, e.g. `warn,yogamix_core=info,yogamix_ui=info`.
    #[must_use]
    pub fn directives(&self) -> String {
        let own = level_to_directive(self.level);
        let mut directives = level_to_directive(self.dependency_level).to_string();
        for target in OWN_TARGETS {
            directives.push_str(&format!(",{target}={own}"));
        }
        directives
    }
}

/// Install the console subscriber.
///
/// Fails when a global subscriber is already set.
pub fn init(config: &LoggingConfig) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_new(config.directives()).unwrap_or_else(|e| {
        leptos::logging::warn!("Invalid log directives, falling back to info: {}", e);
        EnvFilter::new("info")
    });

    let span_events = if config.log_span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    // No timestamps: the wasm target has no system clock.
    let console_layer = fmt::layer()
        .with_writer(ConsoleWriter)
        .without_time()
        .with_ansi(false)
        .with_level(true)
        .with_target(config.include_target)
        .with_file(config.include_file_line)
        .with_line_number(config.include_file_line)
        .with_span_events(span_events);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .try_init()
}

/// Install the subscriber for the current build type, logging any failure.
pub fn init_auto() {
    if let Err(e) = init(&LoggingConfig::auto()) {
        leptos::logging::error!("Failed to initialize logging: {}", e);
    }
}

/// [`MakeWriter`] targeting the browser console.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleWriter;

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleLine::new(*meta.level())
    }
}

/// One formatted event, flushed to the console when dropped.
#[derive(Debug)]
pub struct ConsoleLine {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleLine {
    const fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }

    fn text(&self) -> String {
        String::from_utf8_lossy(&self.buffer).trim_end().to_string()
    }
}

impl io::Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let text = self.text();
        if !text.is_empty() {
            emit(self.level, &text);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, text: &str) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let value = JsValue::from_str(text);
    match level {
        Level::ERROR => console::error_1(&value),
        Level::WARN => console::warn_1(&value),
        Level::INFO => console::info_1(&value),
        Level::DEBUG | Level::TRACE => console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: Level, text: &str) {
    eprintln!("{level} {text}");
}

/// Convert a tracing Level to a filter directive string.
const fn level_to_directive(level: Level) -> &'static str {
    match level {
        Level::TRACE => "trace",
        Level::DEBUG => "debug",
        Level::INFO => "info",
        Level::WARN => "warn",
        Level::ERROR => "error",
    }
}
