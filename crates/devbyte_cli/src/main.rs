//! Command-line host for the DevByte data layer.
//!
//! # Responsibility
//! - Wire configuration, logging, storage and network into one repository.
//! - Act as a stand-in presentation layer that prints the observed videos.

use clap::{Parser, Subcommand};
use devbyte_core::db::open_db;
use devbyte_core::{
    init_logging, playlist_source_from_config, CoreConfig, DevByteVideo, HttpPlaylistSource,
    VideosRepository,
};
use std::error::Error;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "devbyte", version, about = "Fetch and browse cached DevByte videos")]
struct Cli {
    #[command(subcommand)]
    command: TopCommand,
}

#[derive(Subcommand)]
enum TopCommand {
    /// Print a health-check response and the core version.
    Ping,
    #[command(flatten)]
    Store(Command),
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the playlist and store it on disk.
    Refresh,
    /// Print the videos currently stored on disk.
    List {
        /// Print full descriptions instead of the truncated preview.
        #[arg(long)]
        full: bool,
        /// Print the list as a JSON array.
        #[arg(long, conflicts_with = "full")]
        json: bool,
    },
    /// Refresh periodically and print the list after every change.
    Watch {
        #[arg(long, default_value_t = 900)]
        interval_secs: u64,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let command = match cli.command {
        TopCommand::Ping => {
            println!("devbyte_core ping={}", devbyte_core::ping());
            println!("devbyte_core version={}", devbyte_core::core_version());
            return ExitCode::SUCCESS;
        }
        TopCommand::Store(command) => command,
    };

    match run(command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("devbyte: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        let log_dir = log_dir.to_str().ok_or("log directory must be valid UTF-8")?;
        init_logging(&config.log_level, log_dir)?;
    }
    let repo = open_repository(&config)?;

    match command {
        Command::Refresh => {
            let written = repo.refresh_videos().await?;
            println!("Stored {written} video(s).");
        }
        Command::List { json: true, .. } => {
            println!("{}", serde_json::to_string_pretty(&repo.videos().current())?);
        }
        Command::List { full, .. } => print_videos(&repo.videos().current(), full),
        Command::Watch { interval_secs } => watch(repo, interval_secs).await?,
    }
    Ok(())
}

fn open_repository(
    config: &CoreConfig,
) -> Result<VideosRepository<HttpPlaylistSource>, Box<dyn Error>> {
    let conn = open_db(&config.db_path)?;
    let source = playlist_source_from_config(config)?;
    Ok(VideosRepository::new(conn, source)?)
}

async fn watch(
    repo: VideosRepository<HttpPlaylistSource>,
    interval_secs: u64,
) -> Result<(), Box<dyn Error>> {
    let repo = Arc::new(repo);
    let mut videos = repo.videos();
    print_videos(&videos.current(), false);

    let refresher = Arc::clone(&repo);
    let period = Duration::from_secs(interval_secs);
    let refresh_task = tokio::spawn(async move { refresher.refresh_loop(period).await });

    loop {
        tokio::select! {
            changed = videos.changed() => {
                let current = changed?;
                log::info!("event=videos_observed module=cli status=ok video_count={}", current.len());
                print_videos(&current, false);
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    refresh_task.abort();
    Ok(())
}

fn print_videos(videos: &[DevByteVideo], full: bool) {
    if videos.is_empty() {
        println!("No videos stored. Run `devbyte refresh` first.");
        return;
    }
    for (index, video) in videos.iter().enumerate() {
        println!("{:>3}. {}", index + 1, video.title);
        println!("     {}", video.url);
        if full {
            println!("     {}", video.description);
        } else {
            println!("     {}", video.short_description());
        }
    }
}
