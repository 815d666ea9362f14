//! Size-based splitting to fit the API payload ceiling.
//!
//! Files above the threshold are cut at the temporal midpoint into two
//! halves named `<stem> 1.mp3` and `<stem> 2.mp3`. Splitting is not
//! recursive: a half that still exceeds the threshold is left alone, and
//! repeated runs will happily re-split halves from earlier passes.

use super::{files_with_extension, probe, MediaError};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;

const MIB: u64 = 1024 * 1024;

/// What to do with the source file after a successful split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Leave the source in place (25 MiB threshold).
    Keep,
    /// Delete the source once both halves exist (24 MiB threshold, the
    /// extra margin keeps halves clear of the ceiling).
    Cleanup,
}

impl SplitMode {
    /// Byte size above which a file is split.
    pub fn threshold_bytes(&self) -> u64 {
        match self {
            SplitMode::Keep => 25 * MIB,
            SplitMode::Cleanup => 24 * MIB,
        }
    }

    /// Whether the source file is removed after a split.
    pub fn removes_source(&self) -> bool {
        matches!(self, SplitMode::Cleanup)
    }
}

/// Outcome of a splitting pass.
#[derive(Debug, Default)]
pub struct SplitReport {
    /// Source files that were split this pass.
    pub split: Vec<PathBuf>,
    /// Source files removed afterwards (cleanup mode only).
    pub removed: Vec<PathBuf>,
}

/// Split every oversized `.mp3` in `dir` into two halves.
pub async fn split_directory(dir: &Path, mode: SplitMode) -> Result<SplitReport, MediaError> {
    let mut report = SplitReport::default();

    for path in files_with_extension(dir, "mp3")? {
        let size = std::fs::metadata(&path)?.len();
        if !needs_split(size, mode) {
            continue;
        }

        split_file(&path).await?;
        info!("Processed {}", path.display());
        report.split.push(path.clone());

        if mode.removes_source() {
            std::fs::remove_file(&path)?;
            info!("Deleted {}", path.display());
            report.removed.push(path);
        }
    }

    Ok(report)
}

/// Whether a file of `size` bytes exceeds the mode's threshold.
fn needs_split(size: u64, mode: SplitMode) -> bool {
    size > mode.threshold_bytes()
}

/// Paths for the two halves: `<stem> 1.mp3` and `<stem> 2.mp3` beside the
/// source.
fn half_paths(source: &Path) -> (PathBuf, PathBuf) {
    let dir = source.parent().unwrap_or_else(|| Path::new(""));
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    (
        dir.join(format!("{stem} 1.mp3")),
        dir.join(format!("{stem} 2.mp3")),
    )
}

async fn split_file(source: &Path) -> Result<(), MediaError> {
    let duration = probe::duration_secs(source).await?;
    let midpoint = duration / 2.0;
    let (first, second) = half_paths(source);

    export_half(source, &first, None, Some(midpoint)).await?;
    export_half(source, &second, Some(midpoint), None).await?;
    Ok(())
}

/// Export a time window of `source` to `output` without re-encoding.
async fn export_half(
    source: &Path,
    output: &Path,
    start: Option<f64>,
    duration: Option<f64>,
) -> Result<(), MediaError> {
    let mut command = Command::new("ffmpeg");
    command.arg("-y");
    if let Some(start) = start {
        command.arg("-ss").arg(start.to_string());
    }
    command.arg("-i").arg(source);
    if let Some(duration) = duration {
        command.arg("-t").arg(duration.to_string());
    }
    command
        .args(["-c:a", "copy"])
        .args(["-nostdin", "-hide_banner", "-loglevel", "error"])
        .arg(output);

    let result = command.output().await?;
    if !result.status.success() {
        return Err(MediaError::ToolFailed {
            tool: "ffmpeg",
            path: source.display().to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        });
    }
    Ok(())
}
