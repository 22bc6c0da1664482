// gensizes/src/processors/source.rs
use crate::core::{GensizesError, Result, WorkItem};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Reads an image list one path per line.
///
/// A line that is empty once trailing whitespace is stripped ends the input,
/// so a blank line in the middle of a list also stops the run. Lists written
/// by Bundler never contain blank lines before the end.
///
/// Lines are read as raw bytes. On Unix any byte sequence is a valid path;
/// elsewhere a line that is not UTF-8 is a read error.
pub struct LineSource<R> {
    reader: R,
    line: usize,
    finished: bool,
    buf: Vec<u8>,
}

impl LineSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self> {
        log::debug!("Opening input list: {}", path.display());

        let file = File::open(path).map_err(|source| GensizesError::OpenInput {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: 0,
            finished: false,
            buf: Vec::new(),
        }
    }

    /// Returns the next path, or `None` at end of input.
    pub fn next_line(&mut self) -> Result<Option<WorkItem>> {
        if self.finished {
            return Ok(None);
        }

        self.buf.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| GensizesError::ReadInput {
                line: self.line + 1,
                source,
            })?;

        let len = self
            .buf
            .iter()
            .rposition(|b| !b.is_ascii_whitespace())
            .map_or(0, |i| i + 1);
        if read == 0 || len == 0 {
            self.finished = true;
            return Ok(None);
        }
        self.buf.truncate(len);

        let path = bytes_to_path(&self.buf).map_err(|source| GensizesError::ReadInput {
            line: self.line + 1,
            source,
        })?;

        self.line += 1;
        Ok(Some(WorkItem {
            line: self.line,
            path,
        }))
    }

    /// Number of lines handed out so far.
    pub fn lines_read(&self) -> usize {
        self.line
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<WorkItem>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}

#[cfg(unix)]
fn bytes_to_path(bytes: &[u8]) -> std::io::Result<PathBuf> {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    Ok(PathBuf::from(OsStr::from_bytes(bytes)))
}

#[cfg(not(unix))]
fn bytes_to_path(bytes: &[u8]) -> std::io::Result<PathBuf> {
    std::str::from_utf8(bytes)
        .map(PathBuf::from)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn paths(input: &str) -> Vec<PathBuf> {
        LineSource::new(Cursor::new(input))
            .map(|item| item.unwrap().path)
            .collect()
    }

    #[test]
    fn strips_trailing_whitespace() {
        assert_eq!(
            paths("a.jpg  \r\nb c.jpg\t\n"),
            vec![PathBuf::from("a.jpg"), PathBuf::from("b c.jpg")]
        );
    }

    #[test]
    fn keeps_leading_whitespace() {
        assert_eq!(paths(" a.jpg\n"), vec![PathBuf::from(" a.jpg")]);
    }

    #[test]
    fn last_line_without_newline() {
        assert_eq!(
            paths("a.jpg\nb.jpg"),
            vec![PathBuf::from("a.jpg"), PathBuf::from("b.jpg")]
        );
    }

    #[test]
    fn blank_line_ends_input() {
        let mut source = LineSource::new(Cursor::new("a.jpg\n\nb.jpg\n"));

        let first = source.next_line().unwrap().unwrap();
        assert_eq!(first.line, 1);
        assert_eq!(first.path, PathBuf::from("a.jpg"));
        assert!(source.next_line().unwrap().is_none());
        assert!(source.next_line().unwrap().is_none());
        assert_eq!(source.lines_read(), 1);
    }

    #[test]
    fn line_numbers_are_one_based() {
        let lines: Vec<usize> = LineSource::new(Cursor::new("a\nb\nc\n"))
            .map(|item| item.unwrap().line)
            .collect();
        assert_eq!(lines, vec![1, 2, 3]);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_paths_are_kept() {
        use std::os::unix::ffi::OsStrExt;

        let mut source = LineSource::new(Cursor::new(b"caf\xe9.jpg\nb.jpg\n".to_vec()));

        let first = source.next_line().unwrap().unwrap();
        assert_eq!(first.path.as_os_str().as_bytes(), b"caf\xe9.jpg");
        let second = source.next_line().unwrap().unwrap();
        assert_eq!(second.path, PathBuf::from("b.jpg"));
    }

    #[cfg(not(unix))]
    #[test]
    fn non_utf8_paths_are_an_error() {
        let mut source = LineSource::new(Cursor::new(vec![0xff, 0xfe, b'\n']));
        assert!(matches!(
            source.next_line(),
            Err(GensizesError::ReadInput { line: 1, .. })
        ));
    }
}
