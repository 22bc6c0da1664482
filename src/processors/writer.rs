// gensizes/src/processors/writer.rs
use crate::core::{Dimensions, GensizesError, OutputMode, Result, WorkItem};
use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};

/// Owns the output list while a run is in progress.
///
/// Every result goes out as one complete line and is flushed at its newline,
/// so a killed run never leaves half a line behind for the next `--skip`.
/// Dropping the writer releases the file on error paths; `close` is the
/// normal exit and reports a failed final flush.
pub struct ResultWriter {
    path: PathBuf,
    out: LineWriter<File>,
    line: Vec<u8>,
    written: usize,
}

impl ResultWriter {
    pub fn open(path: &Path, mode: OutputMode) -> Result<Self> {
        let mut options = OpenOptions::new();
        match mode {
            OutputMode::Fresh => options.write(true).create(true).truncate(true),
            OutputMode::Resume => options.append(true).create(true),
        };

        log::debug!("Opening output file {} ({:?})", path.display(), mode);

        let file = options
            .open(path)
            .map_err(|source| GensizesError::OpenOutput {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            path: path.to_path_buf(),
            out: LineWriter::new(file),
            line: Vec::new(),
            written: 0,
        })
    }

    /// Appends `<path> <width> <height>`.
    pub fn write(&mut self, item: &WorkItem, size: Dimensions) -> Result<()> {
        self.line.clear();
        self.line.extend_from_slice(&path_bytes(&item.path));
        self.line.extend_from_slice(format!(" {}\n", size).as_bytes());

        self.out
            .write_all(&self.line)
            .map_err(|source| GensizesError::WriteOutput {
                path: self.path.clone(),
                source,
            })?;
        self.written += 1;
        Ok(())
    }

    /// Lines written through this writer, not counting any that were
    /// already in the file.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn close(mut self) -> Result<()> {
        self.out.flush().map_err(|source| GensizesError::WriteOutput {
            path: self.path.clone(),
            source,
        })?;
        log::debug!(
            "Closed {} after {} new lines",
            self.path.display(),
            self.written
        );
        Ok(())
    }
}

/// Raw bytes on Unix, so paths are written back exactly as they were read.
#[cfg(unix)]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    use std::os::unix::ffi::OsStrExt;

    Cow::Borrowed(path.as_os_str().as_bytes())
}

#[cfg(not(unix))]
fn path_bytes(path: &Path) -> Cow<'_, [u8]> {
    match path.to_string_lossy() {
        Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
        Cow::Owned(s) => Cow::Owned(s.into_bytes()),
    }
}
