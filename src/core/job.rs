// gensizes/src/core/job.rs
use super::{Dimensions, JobConfig, OutputMode, Result, WorkItem};
use crate::processors::{LineCounter, LineSource, Probe, ResultWriter};
use crate::utils::{Clock, MonotonicClock, Progress, RateLimited};

/// What a finished run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Input lines consumed, skipped ones included.
    pub lines: usize,
    /// Lines skipped because a previous run already wrote them.
    pub skipped: usize,
    /// Lines appended to the output file by this run.
    pub written: usize,
    /// Written lines that carry the `0 0` sentinel.
    pub failed: usize,
}

/// One pass over an image list: probe each path and append its size to the
/// output file, picking up after the lines an earlier run left behind when
/// resuming.
pub struct Job<P, L> {
    config: JobConfig,
    probe: P,
    counter: L,
}

impl<P: Probe, L: LineCounter> Job<P, L> {
    pub fn new(config: JobConfig, probe: P, counter: L) -> Self {
        Self {
            config,
            probe,
            counter,
        }
    }

    /// Runs the job against wall-clock time. `report` receives the resume
    /// notice and the rate-limited progress lines.
    pub fn run<R: FnMut(&str)>(&self, report: R) -> Result<RunSummary> {
        self.run_with_clock(report, MonotonicClock::new())
    }

    pub fn run_with_clock<R, C>(&self, mut report: R, clock: C) -> Result<RunSummary>
    where
        R: FnMut(&str),
        C: Clock + Clone,
    {
        self.config.validate()?;

        let total = self.counter.count_lines(&self.config.input)?;
        let skip = match self.config.mode {
            OutputMode::Fresh => 0,
            OutputMode::Resume => {
                let skip = self.counter.count_lines(&self.config.output)?;
                report(format!("Skipping {} lines.", skip).as_str());
                if skip > total {
                    log::warn!(
                        "Output file {} has more lines ({}) than the input list ({})",
                        self.config.output.display(),
                        skip,
                        total
                    );
                }
                skip
            }
        };

        let mut source = LineSource::open(&self.config.input)?;
        let mut writer = ResultWriter::open(&self.config.output, self.config.mode)?;

        let started = clock.now();
        let print = |progress: Progress| report(progress.message().as_str());
        let mut reporter = RateLimited::new(print, clock.clone())
            .every(self.config.report_every)
            .interval(self.config.report_interval);

        let mut summary = RunSummary::default();
        while let Some(item) = source.next_line()? {
            if item.line <= skip {
                summary.skipped += 1;
            } else {
                let size = self.measure(&item);
                writer.write(&item, size)?;
                summary.written += 1;
                if size.is_sentinel() {
                    summary.failed += 1;
                }
            }
            summary.lines += 1;

            reporter.call(Progress {
                done: summary.lines as u64,
                total: total as u64,
                elapsed: clock.now().saturating_sub(started),
            });
        }

        writer.close()?;

        log::info!(
            "Processed {} lines from {}: {} skipped, {} written, {} failed",
            summary.lines,
            self.config.input.display(),
            summary.skipped,
            summary.written,
            summary.failed
        );

        Ok(summary)
    }

    /// Probes one item. Any failure is logged and becomes `(0, 0)`.
    fn measure(&self, item: &WorkItem) -> Dimensions {
        match self.probe.probe(&item.path) {
            Ok(size) => {
                log::debug!("{}: {}x{}", item.path.display(), size.width, size.height);
                size
            }
            Err(e) => {
                log::error!("Line {}: {:#}", item.line, anyhow::Error::new(e));
                Dimensions::SENTINEL
            }
        }
    }
}
