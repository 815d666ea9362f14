//! Duration probing via ffprobe.

use super::MediaError;
use std::path::Path;
use tokio::process::Command;

/// Get the duration of a media file in seconds.
pub async fn duration_secs(path: &Path) -> Result<f64, MediaError> {
    let output = Command::new("ffprobe")
        .arg("-i")
        .arg(path)
        .args([
            "-show_entries",
            "format=duration",
            "-v",
            "quiet",
            "-of",
            "csv=p=0",
        ])
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::ToolFailed {
            tool: "ffprobe",
            path: path.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let raw = String::from_utf8_lossy(&output.stdout);
    raw.trim()
        .parse::<f64>()
        .map_err(|_| MediaError::BadDuration {
            path: path.display().to_string(),
            raw: raw.trim().to_string(),
        })
}
