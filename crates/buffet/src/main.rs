use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use buffet::config::Config;

mod commands;

#[derive(Parser)]
#[command(name = "buffet", version, about = "Ask several LLMs at once and compare the answers")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, global = true, default_value = "buffet.yaml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API server
    Serve {
        /// Override the configured host
        #[arg(long)]
        host: Option<String>,
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Send one prompt to the selected models in the active chat
    Ask {
        #[command(flatten)]
        selection: Selection,
        /// The prompt to send
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
    /// Interactive chat against the selected models
    Chat {
        #[command(flatten)]
        selection: Selection,
    },
    /// List chats that have at least one turn
    Threads,
    /// Print a chat column by column (defaults to the active chat)
    Show {
        #[command(flatten)]
        selection: Selection,
        /// Chat id
        id: Option<String>,
    },
    /// Make an existing chat the active one
    Open {
        /// Chat id
        id: String,
    },
    /// Start a new, empty chat
    New,
    /// List the models offered by the server
    Models,
}

/// Model selection shared by the chat commands.
#[derive(Args, Clone, Default)]
pub struct Selection {
    /// Model id to query (repeatable); defaults to the configured selection
    #[arg(short = 'm', long = "model")]
    pub models: Vec<String>,

    /// Override the configured server URL
    #[arg(long)]
    pub server: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logging(cli.verbose, matches!(cli.command, Command::Serve { .. }));

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool, serving: bool) {
    let fallback = match (verbose, serving) {
        (true, _) => "buffet=debug,tower_http=debug",
        (false, true) => "buffet=info,tower_http=info",
        (false, false) => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load(&cli.config).await?;

    match cli.command {
        Command::Serve { host, port } => commands::serve(config, host, port).await,
        Command::Ask { selection, prompt } => {
            commands::ask(&config, &selection, &prompt.join(" ")).await
        }
        Command::Chat { selection } => commands::chat(&config, &selection).await,
        Command::Threads => commands::threads(&config).await,
        Command::Show { selection, id } => {
            commands::show(&config, &selection, id.as_deref()).await
        }
        Command::Open { id } => commands::open(&config, &id).await,
        Command::New => commands::new_thread(&config).await,
        Command::Models => commands::models(&config).await,
    }
}
