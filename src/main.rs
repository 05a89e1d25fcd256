//! QA Rooms CLI
//!
//! Command-line front end for the rooms API:
//! - List rooms
//! - Show a room's questions
//! - Ask a question (optimistic submission)
//! - Print a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use qa_rooms::config::{generate_default_config, Config, LoggingConfig};
use qa_rooms::{HttpRoomsClient, RelativeTimeFormatter, RoomListView, RoomsClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "qa-rooms")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse Q&A rooms and ask questions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Rooms API URL (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List recent rooms
    Rooms,

    /// Show the questions of a room
    Questions {
        /// Room identifier
        room: String,
    },

    /// Ask a question in a room
    Ask {
        /// Room identifier
        room: String,
        /// Question text
        question: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default().context("invalid configuration file")?,
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_logging(&config.logging);

    let locale = config.display.locale().unwrap_or_else(|e| {
        tracing::warn!("{}, falling back to pt-BR", e);
        Default::default()
    });
    let formatter = RelativeTimeFormatter::new(locale);
    let view = RoomListView::new(&formatter);

    let api = HttpRoomsClient::new(config.api.client_config())
        .context("failed to build HTTP client")?;
    let client = RoomsClient::new(Arc::new(api));

    match cli.command {
        Commands::Rooms => {
            client.fetch_rooms().await.context("failed to list rooms")?;
            print!("{}", view.render(&client.rooms_state()));
        }

        Commands::Questions { room } => {
            let questions = client
                .fetch_questions(&room)
                .await
                .with_context(|| format!("failed to list questions of room {}", room))?;
            print!("{}", view.render_questions_at(&questions, chrono::Utc::now()));
        }

        Commands::Ask { room, question } => {
            // Prime the cache so the speculative entry lands on real data
            if let Err(e) = client.fetch_questions(&room).await {
                tracing::warn!(room_id = %room, "Could not load questions: {}", e);
            }

            match client.submit_question(&room, &question).await {
                Ok(created) => {
                    println!("Question {} created in room {}", created.id, room);
                }
                Err(e) => {
                    eprintln!("Failed to create question: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

/// Install the tracing subscriber described by the logging config
fn init_logging(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("qa_rooms={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
