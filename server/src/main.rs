use clap::Parser;
use log::info;
use server::catalog::Catalog;
use server::deck::starting_decklist;
use server::game::GameSession;
use server::network::Server;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "6969")]
    port: u16,

    /// Maximum number of connected clients, players and spectators alike
    #[arg(short, long, default_value = "8")]
    max_clients: usize,

    /// Seconds of silence before a client is dropped
    #[arg(long, default_value = "30")]
    client_timeout: u64,

    /// JSON card catalog to use instead of the built-in one
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Comma-separated decklist both players start with
    #[arg(short, long, value_delimiter = ',')]
    deck: Option<Vec<String>>,

    /// Seed for deck draws, for reproducible games
    #[arg(short, long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let catalog = match &args.catalog {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };
    info!("Loaded {} catalog entries", catalog.len());

    let decklist = args.deck.unwrap_or_else(starting_decklist);
    let session = match args.seed {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            GameSession::with_seed(catalog, decklist, seed)
        }
        None => GameSession::new(catalog, decklist),
    };

    let address = format!("{}:{}", args.host, args.port);
    let mut server = Server::new(
        &address,
        session,
        args.max_clients,
        Duration::from_secs(args.client_timeout),
    )
    .await?;

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
