//! App actor - message loop processing shell events and network responses

use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes shell events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        // Set once input is closed while a request is still in flight
        let mut closing = false;

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv(), if !closing => {
                    match event {
                        UiEvent::EndOfInput if self.state.is_loading => {
                            tracing::info!("Input closed, waiting for pending request");
                            closing = true;
                            continue;
                        }
                        UiEvent::EndOfInput => break,
                        event => {
                            if self.handle_ui_event(event).await {
                                break;
                            }
                        }
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    tracing::info!(id = response.id(), "Response received");
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                    if closing && !self.state.is_loading {
                        break;
                    }
                }
                else => break,
            }
        }

        let _ = self.network_tx.send(NetworkCommand::Shutdown);
        // render_tx drops with self, which ends the shell's drain
    }

    /// Handle a shell event, returns true if quit was requested
    async fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Request form
            UiEvent::SetMethod(method) => self.state.set_method(method),
            UiEvent::SetUrl(url) => self.state.set_url(url),
            UiEvent::AddParam(row) => self.state.add_param(row),
            UiEvent::AddHeader(row) => self.state.add_header(row),
            UiEvent::ClearParams => self.state.clear_params(),
            UiEvent::ClearHeaders => self.state.clear_headers(),
            UiEvent::SetBody(mode, text) => self.state.set_body(mode, text),
            UiEvent::SetAuth(auth) => self.state.set_auth(auth),
            UiEvent::SetTimeout(secs) => self.state.set_timeout(secs),
            UiEvent::SetVerifyTls(verify) => self.state.set_verify_tls(verify),
            UiEvent::ShowConfig => self.state.show_config(),

            // Request actions
            UiEvent::SendRequest => {
                if let Some(cmd) = self.state.send_request() {
                    let _ = self.network_tx.send(cmd);
                }
            }
            UiEvent::ShowCurl => self.state.show_curl(),
            UiEvent::Download(path) => self.download(path).await,

            // Presets
            UiEvent::SavePreset(name) => self.state.save_preset(&name),
            UiEvent::LoadPreset(name) => self.state.load_preset(&name),
            UiEvent::ListPresets => self.state.list_presets(),

            // cURL
            UiEvent::ImportCurl(input) => self.state.import_curl(&input),

            // Popups
            UiEvent::ShowHelp => self.state.toggle_help(),

            // System
            UiEvent::Quit | UiEvent::EndOfInput => return true,
        }

        false
    }

    async fn download(&mut self, path: PathBuf) {
        let Some(body) = self.state.last_body() else {
            self.state.info("No response to download yet");
            return;
        };
        match write_response_body(&path, body).await {
            Ok(()) => {
                let message = format!("Saved {} bytes to {}", body.len(), path.display());
                self.state.success(message);
            }
            Err(e) => {
                tracing::warn!(error = %e, path = %path.display(), "Download failed");
                self.state.error(format!("Cannot write {}: {}", path.display(), e));
            }
        }
    }
}

/// Write raw response bytes to a file
pub async fn write_response_body(path: &Path, body: &[u8]) -> anyhow::Result<()> {
    tokio::fs::write(path, body).await?;
    Ok(())
}
