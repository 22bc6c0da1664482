// gensizes/src/cli.rs
use crate::core::{GensizesError, JobConfig, OutputMode, Result, DEFAULT_PROBE_PROGRAM};
use crate::processors::CommandProbe;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Appends the pixel size of every image in a Bundler list file.
///
/// Each output line is `<path> <width> <height>`. Images the probe cannot
/// read get a size of `0 0`.
#[derive(Parser, Debug)]
#[command(name = "gensizes", version, about)]
pub struct Cli {
    /// Bundler list file (.txt), one image path per line
    pub input: PathBuf,

    /// Bundler list file with sizes (.txt)
    pub output: PathBuf,

    /// Resume an interrupted run by skipping as many input lines as the
    /// output file already has. The existing lines are not verified.
    #[arg(long, action = ArgAction::Count)]
    pub skip: u8,

    /// Program that prints `<width>,<height>` for the image path given as
    /// its last argument
    #[arg(long, default_value = DEFAULT_PROBE_PROGRAM)]
    pub probe: String,

    /// Arguments passed to the probe before the image path
    /// [default: -format %w,%h]
    #[arg(long = "probe-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub probe_args: Vec<String>,

    /// Seconds between progress lines (0 = no time limit)
    #[arg(long, default_value_t = 15.0)]
    pub interval: f64,

    /// Loop iterations between progress lines (0 = no count limit)
    #[arg(long, default_value_t = 0)]
    pub every: u64,

    /// Count lines in process instead of running `wc -l`
    #[arg(long)]
    pub native_count: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn resume(&self) -> bool {
        self.skip > 0
    }

    /// The configured probe; plain `identify` without `--probe-arg` gets the
    /// `-format %w,%h` arguments.
    pub fn command_probe(&self) -> CommandProbe {
        if self.probe_args.is_empty() && self.probe == DEFAULT_PROBE_PROGRAM {
            CommandProbe::identify()
        } else {
            CommandProbe::new(self.probe.clone()).with_args(self.probe_args.iter().cloned())
        }
    }

    pub fn job_config(&self) -> Result<JobConfig> {
        let report_interval = Duration::try_from_secs_f64(self.interval).map_err(|e| {
            GensizesError::InvalidParameter(format!(
                "Interval must be a non-negative number of seconds, got {}: {}",
                self.interval, e
            ))
        })?;

        let config = JobConfig {
            input: self.input.clone(),
            output: self.output.clone(),
            mode: if self.resume() {
                OutputMode::Resume
            } else {
                OutputMode::Fresh
            },
            report_interval,
            report_every: self.every,
        };
        config.validate()?;
        Ok(config)
    }
}
