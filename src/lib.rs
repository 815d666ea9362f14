//! Batchscribe library exports for integration tests.
//!
//! The pipeline has three stages that each walk a single directory:
//! format conversion, size-based splitting, and remote transcription.

pub mod config;
pub mod media;
pub mod transcribe;

// Re-export commonly used types for convenience
pub use config::Config;
pub use media::split::SplitMode;
pub use transcribe::client::WhisperClient;
pub use transcribe::retry::RetryPolicy;
