//! restprobe - interactive REST API tester
//!
//! Architecture:
//! - Shell Layer - reads commands from stdin, prints render state
//! - App Layer - session state processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use restprobe::constants::{APP_NAME, APP_VERSION, LOG_FILE};
use restprobe::messages::{parse_command, Notice, NetworkCommand, NetworkResponse, RenderState, UiEvent};
use restprobe::{ui, AppActor, NetworkActor, ReqwestExecutor};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(version = APP_VERSION, "Starting {}", APP_NAME);

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let executor = Arc::new(ReqwestExecutor::new()?);
    let network_actor = NetworkActor::new(executor, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(net_cmd_tx, render_tx);
    let app_handle = tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    println!("{} {} - type 'help' for commands", APP_NAME, APP_VERSION);
    run_shell(ui_tx, &mut render_rx).await?;

    let _ = app_handle.await;
    tracing::info!("Session ended");
    Ok(())
}

/// Run the line-oriented shell loop
async fn run_shell(
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let styled = io::stdout().is_terminal();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut current_state = RenderState::default();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    let _ = ui_tx.send(UiEvent::EndOfInput);
                    break;
                };
                match parse_command(&line) {
                    Ok(Some(UiEvent::Quit)) => {
                        let _ = ui_tx.send(UiEvent::Quit);
                        break;
                    }
                    Ok(Some(event)) => {
                        let _ = ui_tx.send(event);
                    }
                    Ok(None) => print_prompt(&current_state, styled)?,
                    Err(message) => {
                        let state = RenderState {
                            notice: Some(Notice::Error(message)),
                            ..current_state.clone()
                        };
                        print!("{}", ui::render(&state, styled));
                        print_prompt(&current_state, styled)?;
                    }
                }
            }
            Some(state) = render_rx.recv() => {
                print!("{}", ui::render(&state, styled));
                current_state = RenderState {
                    response: None,
                    notice: None,
                    show_help: false,
                    ..state
                };
                print_prompt(&current_state, styled)?;
            }
        }
    }

    // Print what the app actor still has queued; the channel closes when it exits
    while let Some(state) = render_rx.recv().await {
        print!("{}", ui::render(&state, styled));
    }
    println!();
    io::stdout().flush()?;

    Ok(())
}

fn print_prompt(state: &RenderState, styled: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "{}", ui::prompt(state, styled))?;
    stdout.flush()
}
