//! Global `tracing` subscriber for hosts of the lexis resolver.
//!
//! Resolver diagnostics are emitted as `WARN` events under the `lexis`
//! target; this crate routes them (and the host's own events) to the
//! console and/or rolling log files.

use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    filter::LevelFilter,
    fmt::{self, time::ChronoLocal},
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";
const DEFAULT_LOG_DIR: &str = "./logs";
const DEFAULT_FILE_PREFIX: &str = "lexis.log";

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("failed to create log file appender: {0}")]
    Appender(#[from] InitError),
    #[error("failed to install global subscriber: {0}")]
    Install(#[from] TryInitError),
}

/// How often the log file rolls over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rolling {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

impl From<Rolling> for Rotation {
    fn from(rolling: Rolling) -> Self {
        match rolling {
            Rolling::Minutely => Rotation::MINUTELY,
            Rolling::Hourly => Rotation::HOURLY,
            Rolling::Daily => Rotation::DAILY,
            Rolling::Never => Rotation::NEVER,
        }
    }
}

/// Logger configuration builder.
///
/// Console and file output are both enabled by default. File output goes
/// through a non-blocking writer, so the guard returned by
/// [`LoggerConfig::init`] must be held until shutdown.
pub struct LoggerConfig {
    /// Rolled files are named `<prefix>.<date>` (just `<prefix>` with
    /// [`Rolling::Never`]).
    file_prefix: String,
    log_dir: PathBuf,
    /// chrono strftime format.
    time_format: String,
    level: String,
    /// `EnvFilter` directives, e.g. `info,lexis=warn`; override `level`.
    directives: Option<String>,
    console: bool,
    file: bool,
    rolling: Rolling,
    /// Oldest files beyond this count are deleted on rollover.
    max_files: Option<usize>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            level: "INFO".to_string(),
            directives: None,
            console: true,
            file: true,
            rolling: Rolling::default(),
            max_files: None,
        }
    }
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn time_format(mut self, format: impl Into<String>) -> Self {
        self.time_format = format.into();
        self
    }

    /// Global level used when no directives are set. Unparseable values
    /// fall back to `INFO`.
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    pub fn enable_console(mut self, enable: bool) -> Self {
        self.console = enable;
        self
    }

    pub fn enable_file(mut self, enable: bool) -> Self {
        self.file = enable;
        self
    }

    pub fn rolling(mut self, rolling: Rolling) -> Self {
        self.rolling = rolling;
        self
    }

    pub fn max_files(mut self, count: usize) -> Self {
        self.max_files = Some(count);
        self
    }

    /// Installs the global subscriber.
    ///
    /// Returns the file writer's guard when file output is enabled. Fails if
    /// the log directory cannot be used or a global subscriber is already
    /// installed.
    pub fn init(self) -> Result<Option<WorkerGuard>, LoggerError> {
        let console_layer = self.build_console_layer();
        let (file_layer, guard) = self.build_file_layer()?;

        Registry::default()
            .with(console_layer)
            .with(file_layer)
            .try_init()?;

        Ok(guard)
    }

    fn env_filter(&self) -> EnvFilter {
        let level = self
            .level
            .parse::<LevelFilter>()
            .unwrap_or(LevelFilter::INFO);

        let builder = EnvFilter::builder().with_default_directive(level.into());
        match &self.directives {
            Some(directives) => builder.parse_lossy(directives),
            None => builder.parse_lossy(""),
        }
    }

    fn build_console_layer<S>(&self) -> Option<impl Layer<S>>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        self.console.then(|| {
            fmt::layer()
                .with_timer(ChronoLocal::new(self.time_format.clone()))
                .with_writer(std::io::stdout)
                .with_filter(self.env_filter())
        })
    }

    fn build_file_layer<S>(&self) -> Result<(Option<impl Layer<S>>, Option<WorkerGuard>), LoggerError>
    where
        S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    {
        if !self.file {
            return Ok((None, None));
        }

        let mut builder = RollingFileAppender::builder()
            .rotation(self.rolling.into())
            .filename_prefix(self.file_prefix.clone());
        if let Some(max_files) = self.max_files {
            builder = builder.max_log_files(max_files);
        }
        let appender = builder.build(&self.log_dir)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(appender);

        let layer = fmt::layer()
            .with_timer(ChronoLocal::new(self.time_format.clone()))
            .with_ansi(false)
            .with_writer(non_blocking)
            .with_filter(self.env_filter());

        Ok((Some(layer), Some(guard)))
    }
}
