//! Hiroba chat server.
//!
//! Every WebSocket connection on `/ws` joins the one global room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-server
//! cargo run --bin hiroba-server -- --host 0.0.0.0 --port 3000 --static-dir ./public
//! HIROBA_PORT=3000 cargo run --bin hiroba-server
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use hiroba_server::{
    domain::RandomNameGenerator,
    ui::{AppState, Server},
};
use hiroba_shared::{
    logger::setup_logger,
    time::{MonotonicClock, SystemClock},
};

#[derive(Parser, Debug)]
#[command(name = "hiroba-server")]
#[command(about = "Presence-aware group chat server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HIROBA_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "HIROBA_PORT", default_value = "3000")]
    port: u16,

    /// Directory of static files served for any path not matched by the API
    #[arg(long, env = "HIROBA_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "HIROBA_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_BIN_NAME"),
        &args.log_level,
    );

    let state = Arc::new(AppState::in_memory(
        Arc::new(RandomNameGenerator),
        Arc::new(MonotonicClock::new(SystemClock)),
    ));

    let server = Server::new(state, args.static_dir);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
