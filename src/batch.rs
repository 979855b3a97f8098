//! Batch conversion of several definition files.
//!
//! Files are independent, so they are converted in parallel. Results come
//! back in input order and a failure in one file never affects another.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::convert::Converter;
use crate::error::ConvertError;

/// Why a single file could not be converted.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read input: {0}")]
    Read(#[source] io::Error),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl FileError {
    pub fn kind(&self) -> &'static str {
        match self {
            FileError::Read(_) => "ReadError",
            FileError::Convert(err) => err.kind(),
            FileError::Write { .. } => "WriteError",
        }
    }
}

/// Where the rendered declarations went.
#[derive(Debug)]
pub enum Output {
    /// Written to this path.
    Written(PathBuf),
    /// Kept in memory, for printing to stdout.
    Text(String),
}

/// The result of converting one input file.
#[derive(Debug)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub result: Result<Output, FileError>,
}

impl FileOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Output path for an input file: `<output_dir>/<stem>.d.ts`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    output_dir.join(format!("{stem}.d.ts"))
}

/// Convert every input. With an output directory each result is written to
/// [`output_path`]; without one the text is returned. Nothing is written for
/// a file that fails.
pub fn convert_files(
    converter: &Converter<'_>,
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
) -> Vec<FileOutcome> {
    inputs
        .par_iter()
        .map(|input| FileOutcome {
            input: input.clone(),
            result: convert_file(converter, input, output_dir),
        })
        .collect()
}

fn convert_file(
    converter: &Converter<'_>,
    input: &Path,
    output_dir: Option<&Path>,
) -> Result<Output, FileError> {
    debug!(input = %input.display(), "converting");
    let source = fs::read_to_string(input).map_err(FileError::Read)?;
    let text = converter.convert_str(&source)?;

    match output_dir {
        Some(dir) => {
            let path = output_path(input, dir);
            fs::write(&path, text).map_err(|source| FileError::Write {
                path: path.clone(),
                source,
            })?;
            debug!(output = %path.display(), "wrote declarations");
            Ok(Output::Written(path))
        }
        None => Ok(Output::Text(text)),
    }
}
