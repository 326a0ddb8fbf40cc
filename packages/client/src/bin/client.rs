//! Hiroba terminal chat client.
//!
//! Connects to a Hiroba server, shows the live roster and relays lines typed
//! at the prompt. `/users` asks for the roster, `/quit` exits. A failed
//! connection is reported and the client exits; it does not retry.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin hiroba-client
//! cargo run --bin hiroba-client -- --url ws://127.0.0.1:3000/ws
//! HIROBA_URL=ws://chat.example:3000/ws cargo run --bin hiroba-client
//! ```

use clap::Parser;
use hiroba_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "hiroba-client")]
#[command(about = "Terminal client for the Hiroba group chat", long_about = None)]
struct Args {
    /// WebSocket server URL
    #[arg(short = 'u', long, env = "HIROBA_URL", default_value = "ws://127.0.0.1:3000/ws")]
    url: String,

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

    if let Err(e) = hiroba_client::run_client(args.url).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
