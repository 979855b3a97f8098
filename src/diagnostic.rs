//! Coloured failure reports on stderr.

use std::io::Write;
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::batch::FileError;
use crate::download::DownloadError;

fn emit(label: &str, color: Color, message: &str) {
    let mut stream = StandardStream::stderr(ColorChoice::Auto);
    let _ = stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stream, "{label}");
    let _ = stream.reset();
    let _ = writeln!(stream, ": {message}");
}

/// Format a conversion failure: file name, error kind and the offending token.
pub fn format_file_error(input: &Path, err: &FileError) -> String {
    format!("{}: [{}] {}", input.display(), err.kind(), err)
}

/// Report a file that failed to convert.
pub fn report_file_error(input: &Path, err: &FileError) {
    emit("error", Color::Red, &format_file_error(input, err));
}

/// Report a definition that failed to download.
pub fn report_download_error(id: &str, err: &DownloadError) {
    emit("error", Color::Red, &format!("{id}: {err}"));
}

/// Report a batch summary when some items failed.
pub fn report_summary(failed: usize, total: usize) {
    emit(
        "error",
        Color::Red,
        &format!("{failed} of {total} file(s) failed"),
    );
}
