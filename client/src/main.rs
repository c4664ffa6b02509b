use clap::Parser;
use log::info;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:6969")]
    server: String,

    /// Seat to join right after connecting (player1 or player2)
    #[arg(short = 'p', long)]
    player: Option<String>,

    /// Seconds between keep-alive packets
    #[arg(long, default_value = "5")]
    heartbeat: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Starting client...");
    let mut client =
        client::network::Client::new(&args.server, Duration::from_secs(args.heartbeat.max(1)))
            .await?;

    client.run(args.player).await?;

    Ok(())
}
