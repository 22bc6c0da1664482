// gensizes/src/processors/probe.rs
use crate::core::{Dimensions, DEFAULT_PROBE_ARGS, DEFAULT_PROBE_PROGRAM};
use std::borrow::Cow;
use std::path::Path;
use std::process::{Command, Stdio};
use thiserror::Error;

/// Why the size of a single image could not be determined.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Failed to run '{program}' for {path}")]
    Spawn {
        program: String,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {status} for {path}, output follows:\n{output}")]
    Exit {
        program: String,
        path: String,
        status: String,
        output: String,
    },

    #[error("Unexpected probe output for {path}: {output:?}")]
    Parse { path: String, output: String },
}

/// Something that can tell the pixel size of an image file.
pub trait Probe {
    fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError>;
}

impl<F> Probe for F
where
    F: Fn(&Path) -> Result<Dimensions, ProbeError>,
{
    fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError> {
        self(path)
    }
}

/// Runs an external program once per image, with the image path appended
/// as the last argument. The program must print `<width>,<height>`.
///
/// A relative path starting with `-` is passed as `./-name` so the program
/// does not read it as an option.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// ImageMagick `identify -format %w,%h`.
    pub fn identify() -> Self {
        Self::new(DEFAULT_PROBE_PROGRAM).with_args(DEFAULT_PROBE_ARGS)
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Probe for CommandProbe {
    fn probe(&self, path: &Path) -> Result<Dimensions, ProbeError> {
        log::debug!("Probing {} with {}", path.display(), self.program);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(image_arg(path).as_os_str())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| ProbeError::Spawn {
                program: self.program.clone(),
                path: path.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(ProbeError::Exit {
                program: self.program.clone(),
                path: path.display().to_string(),
                status: output.status.to_string(),
                output: combined.trim_end().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_dimensions(&stdout).ok_or_else(|| ProbeError::Parse {
            path: path.display().to_string(),
            output: stdout.into_owned(),
        })
    }
}

fn image_arg(path: &Path) -> Cow<'_, Path> {
    if path.is_relative() && path.as_os_str().to_string_lossy().starts_with('-') {
        Cow::Owned(Path::new(".").join(path))
    } else {
        Cow::Borrowed(path)
    }
}

/// Parses `<width>,<height>`, ignoring surrounding whitespace.
pub fn parse_dimensions(output: &str) -> Option<Dimensions> {
    let (width, height) = output.trim().split_once(',')?;
    let width = width.trim().parse().ok()?;
    let height = height.trim().parse().ok()?;
    Some(Dimensions::new(width, height))
}
