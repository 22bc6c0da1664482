// gensizes/src/core/mod.rs
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub mod job;

pub use job::{Job, RunSummary};

pub const DEFAULT_PROBE_PROGRAM: &str = "identify";
pub const DEFAULT_PROBE_ARGS: [&str; 2] = ["-format", "%w,%h"];
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(15);

/// How the output file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Truncate and write from the start.
    Fresh,
    /// Append after the lines a previous run left behind.
    Resume,
}

/// One line of the input list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// 1-based position in the input file.
    pub line: usize,
    pub path: PathBuf,
}

/// Pixel size of one image. `(0, 0)` marks a failed probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const SENTINEL: Dimensions = Dimensions { width: 0, height: 0 };

    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == Self::SENTINEL
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.width, self.height)
    }
}

#[derive(Debug, Clone)]
pub struct JobConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: OutputMode,
    /// Minimum time between two progress lines; zero disables the limit.
    pub report_interval: Duration,
    /// Minimum number of iterations between two progress lines; zero disables the limit.
    pub report_every: u64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            mode: OutputMode::Fresh,
            report_interval: DEFAULT_REPORT_INTERVAL,
            report_every: 0,
        }
    }
}

impl JobConfig {
    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(GensizesError::InvalidParameter(
                "Input file must be specified".to_string(),
            ));
        }

        if self.output.as_os_str().is_empty() {
            return Err(GensizesError::InvalidParameter(
                "Output file must be specified".to_string(),
            ));
        }

        if self.input == self.output {
            return Err(GensizesError::InvalidParameter(
                "Input and output files cannot be the same".to_string(),
            ));
        }

        Ok(())
    }
}

/// Errors that abort a whole run.
#[derive(Error, Debug)]
pub enum GensizesError {
    #[error("Failed to open input list: {path}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read line {line} of input list")]
    ReadInput {
        line: usize,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open output file: {path}")]
    OpenOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to count lines of {path}: {reason}")]
    LineCount { path: PathBuf, reason: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, GensizesError>;
