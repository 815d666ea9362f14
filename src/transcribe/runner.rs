//! Directory runner: transcribe every mp3 lacking a transcript.
//!
//! The transcript path doubles as the idempotence marker: if it exists the
//! file is skipped without any network call, regardless of its content.

use super::client::WhisperClient;
use super::retry::RetryPolicy;
use super::TranscribeError;
use crate::media;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of a transcription pass. Per-file failures are counted, not
/// propagated.
#[derive(Debug, Default)]
pub struct RunReport {
    pub transcribed: usize,
    pub skipped: usize,
    pub empty: usize,
    pub failed: usize,
}

/// Derive the transcript path from an audio path by extension substitution.
pub fn transcript_path(audio: &Path) -> PathBuf {
    audio.with_extension("txt")
}

/// Transcribe every `.mp3` in `dir` that has no transcript yet.
///
/// The outer `Result` covers only the directory listing; everything after
/// that is contained to the file being processed.
pub async fn transcribe_directory(
    dir: &Path,
    client: &WhisperClient,
    policy: &RetryPolicy,
) -> Result<RunReport, TranscribeError> {
    let files = media::files_with_extension(dir, "mp3").map_err(io_from_media)?;

    let mut report = RunReport::default();
    for path in files {
        let output = transcript_path(&path);
        if output.exists() {
            info!("Skipping {}, transcript already exists", path.display());
            report.skipped += 1;
            continue;
        }

        match policy.run(|| client.transcribe(&path)).await {
            Ok(Some(text)) => match tokio::fs::write(&output, &text).await {
                Ok(()) => {
                    info!("Transcript saved to {}", output.display());
                    report.transcribed += 1;
                }
                Err(err) => {
                    warn!("Failed to write {}: {}", output.display(), err);
                    report.failed += 1;
                }
            },
            Ok(None) => {
                info!(
                    "Transcription received for {} but was empty",
                    path.display()
                );
                report.empty += 1;
            }
            Err(err) => {
                warn!("Failed to transcribe {}: {}", path.display(), err);
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

fn io_from_media(err: media::MediaError) -> TranscribeError {
    match err {
        media::MediaError::Io(io) => TranscribeError::Io(io),
        other => TranscribeError::Io(std::io::Error::other(other.to_string())),
    }
}
