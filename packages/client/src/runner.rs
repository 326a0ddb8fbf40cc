//! Client execution logic.
//!
//! A failed connection is terminal: the client reports it and exits
//! without retrying.

use std::sync::Arc;

use hiroba_shared::{protocol::ClientEvent, time::SystemClock};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{
    connection::ConnectionManager,
    domain::{InputCommand, parse_input},
    error::ClientError,
    formatter::MessageFormatter,
    reconciler::{Reconciler, Update},
    transport::{TransportEvent, WebSocketTransport},
    ui::{PROMPT, redisplay_prompt},
};

/// Run the chat client until the user quits or the connection drops
pub async fn run_client(url: String) -> Result<(), ClientError> {
    let (manager, mut inbound) = ConnectionManager::new(Arc::new(WebSocketTransport), url.clone());

    let mut state_rx = manager.subscribe();
    tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            tracing::debug!("Connection state changed: {:?}", *state_rx.borrow());
        }
    });

    tracing::info!("Connecting to {}", url);
    manager.connect().await?;
    println!(
        "\nConnected. Type messages and press Enter to send. /users lists participants, /quit exits.\n"
    );

    let mut reconciler = Reconciler::new(Arc::new(SystemClock));
    let mut input_rx = spawn_readline();

    let result = loop {
        tokio::select! {
            event = inbound.recv() => match event {
                Some(TransportEvent::Frame(frame)) => render(&reconciler.apply_frame(&frame), &reconciler),
                Some(TransportEvent::Closed) | None => break Err(ClientError::ConnectionClosed),
            },
            line = input_rx.recv() => {
                let Some(line) = line else {
                    // Ctrl+C or Ctrl+D
                    break Ok(());
                };
                let event = match parse_input(&line) {
                    InputCommand::Chat(text) => ClientEvent::ChatMessage(text),
                    InputCommand::RequestUsers => ClientEvent::RequestUserList,
                    InputCommand::Quit => break Ok(()),
                    InputCommand::Empty => continue,
                };
                if let Err(e) = manager.send(&event).await {
                    break Err(e);
                }
            }
        }
    };

    manager.disconnect().await;
    result
}

fn render(update: &Update, reconciler: &Reconciler) {
    match update {
        Update::Appended(entry) => print!("{}", MessageFormatter::format_entry(entry)),
        Update::RosterReplaced => print!("{}", MessageFormatter::format_roster(reconciler.roster())),
        Update::Duplicate | Update::Ignored => return,
    }
    redisplay_prompt();
}

/// Read lines on a blocking thread (rustyline is synchronous)
fn spawn_readline() -> mpsc::UnboundedReceiver<String> {
    let (input_tx, input_rx) = mpsc::unbounded_channel::<String>();

    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    input_rx
}
