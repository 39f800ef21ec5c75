//! Flowdash main entry point

use clap::Parser;
use flowdash_api::{start_server, AppState};
use flowdash_config::Config;
use flowdash_core::new_shared_board;
use flowdash_feed::{FeedClient, FeedSettings, FeedTransport, JsonStreamTransport};
use std::path::PathBuf;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "flowdash")]
#[command(author = "Flowdash Contributors")]
#[command(version = "0.1.0")]
#[command(about = "A live transaction dashboard over a streaming feed", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Print a default configuration file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.init_config {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let rt = Runtime::new()?;

    rt.block_on(async {
        let config = Config::load(args.config.clone())?;

        // Configured level as the base; RUST_LOG still wins when set
        env_logger::Builder::new()
            .parse_filters(&config.logging.level)
            .parse_default_env()
            .init();

        eprintln!(
            "[INFO] Config loaded: upstream={}, currency={}",
            config.upstream.base_url, config.currency.code
        );

        let board = new_shared_board();

        // Connect the feed and start the client task. A failed connection
        // is not fatal: the board renders empty and the server still runs.
        let transport = JsonStreamTransport;
        let _feed = match transport.connect(&config.upstream.base_url).await {
            Ok(events) => {
                let settings = FeedSettings::from(config.feed);
                Some(FeedClient::spawn(events, board.clone(), settings))
            }
            Err(e) => {
                eprintln!("[WARN] Feed connection failed: {}", e);
                board.write().await.set_loading(false);
                None
            }
        };

        let state = AppState::new(board, config);
        start_server(state).await
    })?;

    Ok(())
}
