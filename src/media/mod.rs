//! Media preparation stages: format conversion and size-based splitting.
//!
//! Both stages shell out to ffmpeg/ffprobe rather than decoding audio
//! in-process. They walk a single directory, non-recursively.

pub mod convert;
pub mod probe;
pub mod split;

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{tool} failed for {path}: {stderr}")]
    ToolFailed {
        tool: &'static str,
        path: String,
        stderr: String,
    },

    #[error("Could not parse duration for {path}: {raw:?}")]
    BadDuration { path: String, raw: String },
}

/// List regular files in `dir` with the given extension (case-insensitive).
///
/// Non-recursive. Sorted for deterministic processing order.
pub(crate) fn files_with_extension(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, MediaError> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if matches && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
