//! Format normalization: container formats to mp3.
//!
//! Whisper uploads are lighter as mp3, so `.m4a` and `.mp4` recordings are
//! re-encoded into an `mp3/` subdirectory of the source directory.

use super::{files_with_extension, MediaError};
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::info;

/// Name of the subdirectory receiving converted files.
pub const MP3_SUBDIR: &str = "mp3";

/// Container extensions accepted as conversion input.
pub const INPUT_EXTENSIONS: [&str; 2] = ["m4a", "mp4"];

/// Outcome of a conversion pass.
#[derive(Debug, Default)]
pub struct ConvertReport {
    /// Paths of the mp3 files produced.
    pub converted: Vec<PathBuf>,
}

/// Convert every `.m4a`/`.mp4` file in `dir` to mp3 under `dir/mp3`.
///
/// Existing outputs are overwritten. Returns the subdirectory contents that
/// were (re)created this pass.
pub async fn convert_directory(dir: &Path) -> Result<ConvertReport, MediaError> {
    let mp3_dir = dir.join(MP3_SUBDIR);
    std::fs::create_dir_all(&mp3_dir)?;

    let mut report = ConvertReport::default();
    for ext in INPUT_EXTENSIONS {
        for path in files_with_extension(dir, ext)? {
            let output = mp3_output_path(&mp3_dir, &path);
            convert_file(&path, &output).await?;
            info!(
                "Converted {} to mp3 in '{}' subdirectory",
                path.display(),
                MP3_SUBDIR
            );
            report.converted.push(output);
        }
    }
    Ok(report)
}

/// Map a source file to its mp3 path inside the output directory.
fn mp3_output_path(mp3_dir: &Path, source: &Path) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    mp3_dir.join(format!("{stem}.mp3"))
}

async fn convert_file(input: &Path, output: &Path) -> Result<(), MediaError> {
    let result = Command::new("ffmpeg")
        .arg("-y")
        .arg("-i")
        .arg(input)
        .args(["-vn", "-acodec", "libmp3lame", "-q:a", "2"])
        .args(["-nostdin", "-hide_banner", "-loglevel", "error"])
        .arg(output)
        .output()
        .await?;

    if !result.status.success() {
        return Err(MediaError::ToolFailed {
            tool: "ffmpeg",
            path: input.display().to_string(),
            stderr: String::from_utf8_lossy(&result.stderr).into_owned(),
        });
    }
    Ok(())
}
