use std::path::{Path, PathBuf};
use std::time::Duration;

use batchscribe::config::Redacted;
use batchscribe::media::{convert, split};
use batchscribe::transcribe::runner;
use batchscribe::{Config, RetryPolicy, SplitMode, WhisperClient};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "batchscribe")]
#[command(author, version, about = "Batch interview transcription pipeline", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert .m4a/.mp4 files in a directory to mp3
    Convert {
        /// Directory containing the recordings
        dir: PathBuf,
    },

    /// Split oversized mp3 files into two halves
    Split {
        /// Directory containing mp3 files
        dir: PathBuf,

        /// Delete the source file after a successful split
        #[arg(long)]
        cleanup: bool,
    },

    /// Transcribe every mp3 lacking a transcript
    Transcribe {
        /// Directory containing mp3 files
        dir: PathBuf,

        /// Attempts per file for transient (503) failures
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Seconds to wait between attempts
        #[arg(long)]
        retry_delay: Option<u64>,
    },

    /// Run all three stages: convert, split, transcribe
    Run {
        /// Directory containing the recordings
        dir: PathBuf,

        /// Delete oversized sources after splitting
        #[arg(long)]
        cleanup: bool,
    },

    /// Show the resolved configuration (API key redacted)
    Config,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("batchscribe=debug,reqwest=info")
    } else {
        EnvFilter::new("batchscribe=info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config(max_attempts: Option<u32>, retry_delay: Option<u64>) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;
    if let Some(max_attempts) = max_attempts {
        config.retry.max_attempts = max_attempts;
    }
    if let Some(secs) = retry_delay {
        config.retry.delay = Duration::from_secs(secs);
    }
    config.validate()?;
    Ok(config)
}

async fn transcribe_stage(dir: &Path, config: Config) -> anyhow::Result<()> {
    let policy = RetryPolicy::from(&config.retry);
    let client = WhisperClient::new(config);
    let report = runner::transcribe_directory(dir, &client, &policy).await?;
    info!(
        "Transcription finished: {} new, {} skipped, {} empty, {} failed",
        report.transcribed, report.skipped, report.empty, report.failed
    );
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Convert { dir } => {
            let report = convert::convert_directory(&dir).await?;
            info!("Converted {} file(s)", report.converted.len());
        }

        Commands::Split { dir, cleanup } => {
            let mode = if cleanup {
                SplitMode::Cleanup
            } else {
                SplitMode::Keep
            };
            let report = split::split_directory(&dir, mode).await?;
            info!(
                "Split {} file(s), removed {}",
                report.split.len(),
                report.removed.len()
            );
        }

        Commands::Transcribe {
            dir,
            max_attempts,
            retry_delay,
        } => {
            let config = load_config(max_attempts, retry_delay)?;
            transcribe_stage(&dir, config).await?;
        }

        Commands::Run { dir, cleanup } => {
            let config = load_config(None, None)?;
            let mode = if cleanup {
                SplitMode::Cleanup
            } else {
                SplitMode::Keep
            };

            let report = convert::convert_directory(&dir).await?;
            info!("Converted {} file(s)", report.converted.len());

            let mp3_dir = dir.join(convert::MP3_SUBDIR);
            let report = split::split_directory(&mp3_dir, mode).await?;
            info!(
                "Split {} file(s), removed {}",
                report.split.len(),
                report.removed.len()
            );

            transcribe_stage(&mp3_dir, config).await?;
        }

        Commands::Config => {
            let config = Config::from_env()?;
            print!("{}", Redacted(&config));
        }
    }

    Ok(())
}
