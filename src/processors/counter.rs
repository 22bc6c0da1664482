// gensizes/src/processors/counter.rs
use crate::core::{GensizesError, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};

/// Counts newline-terminated lines in a file, the way `wc -l` does.
pub trait LineCounter {
    fn count_lines(&self, path: &Path) -> Result<usize>;
}

/// Shells out to `wc -l` and reads the first token of its output.
#[derive(Debug, Clone)]
pub struct WcLineCounter {
    program: String,
}

impl WcLineCounter {
    pub fn new() -> Self {
        Self {
            program: "wc".to_string(),
        }
    }

    fn command(&self, path: &Path) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("-l").arg("--").arg(path).stdin(Stdio::null());
        command
    }
}

impl Default for WcLineCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl LineCounter for WcLineCounter {
    fn count_lines(&self, path: &Path) -> Result<usize> {
        let fail = |reason: String| GensizesError::LineCount {
            path: path.to_path_buf(),
            reason,
        };

        let output = self
            .command(path)
            .output()
            .map_err(|e| fail(format!("could not run {}: {}", self.program, e)))?;

        if !output.status.success() {
            return Err(fail(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim_end()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_count(&stdout).ok_or_else(|| fail(format!("unexpected output {:?}", stdout)))
    }
}

/// Counts lines without spawning a process.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeLineCounter;

impl LineCounter for NativeLineCounter {
    fn count_lines(&self, path: &Path) -> Result<usize> {
        let fail = |e: std::io::Error| GensizesError::LineCount {
            path: path.to_path_buf(),
            reason: e.to_string(),
        };

        let mut reader = BufReader::new(File::open(path).map_err(fail)?);
        let mut buf = [0u8; 64 * 1024];
        let mut count = 0;

        loop {
            let read = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(fail(e)),
            };
            count += buf[..read].iter().filter(|&&b| b == b'\n').count();
        }

        Ok(count)
    }
}

fn parse_count(output: &str) -> Option<usize> {
    output.split_whitespace().next()?.parse().ok()
}
