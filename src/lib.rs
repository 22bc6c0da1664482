mod cli;
mod core;
mod processors;
mod utils;

pub use crate::cli::Cli;
pub use crate::core::{
    Dimensions, GensizesError, Job, JobConfig, OutputMode, Result, RunSummary,
    WorkItem, DEFAULT_PROBE_ARGS, DEFAULT_PROBE_PROGRAM, DEFAULT_REPORT_INTERVAL,
};
pub use processors::{
    parse_dimensions, CommandProbe, LineCounter, LineSource, NativeLineCounter, Probe, ProbeError,
    ResultWriter, WcLineCounter,
};
pub use utils::{format_minutes, Clock, MonotonicClock, Progress, RateLimited};
