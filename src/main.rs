use anyhow::Context;
use clap::Parser;
use gensizes::{Cli, Job, NativeLineCounter, WcLineCounter};
use log::LevelFilter;

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            // Missing or malformed arguments: usage and exit code 1.
            let _ = e.print();
            std::process::exit(1);
        }
        Err(e) => e.exit(),
    };

    // Initialize logger
    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    println!("Success.");
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.job_config().context("Invalid arguments")?;
    let probe = cli.command_probe();
    let print = |line: &str| println!("{}", line);

    let summary = if cli.native_count {
        Job::new(config, probe, NativeLineCounter).run(print)
    } else {
        Job::new(config, probe, WcLineCounter::new()).run(print)
    }
    .with_context(|| {
        format!(
            "Failed to list sizes of {} into {}",
            cli.input.display(),
            cli.output.display()
        )
    })?;

    if summary.failed > 0 {
        log::warn!(
            "{} of {} images could not be probed and were recorded as 0 0",
            summary.failed,
            summary.written
        );
    }

    Ok(())
}
