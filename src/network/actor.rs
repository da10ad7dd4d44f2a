//! Network actor - runs HTTP requests in the Tokio async runtime

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::HttpExecutor;

/// Network actor that processes execute commands
pub struct NetworkActor {
    executor: Arc<dyn HttpExecutor>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(
        executor: Arc<dyn HttpExecutor>,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            executor,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                // Handle incoming commands
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::ExecuteRequest { id, descriptor }) => {
                            let response_tx = self.response_tx.clone();
                            let executor = Arc::clone(&self.executor);

                            self.active_requests.spawn(async move {
                                tracing::info!(id, url = %descriptor.url, method = descriptor.method.as_str(), "Executing request");
                                let response = match executor.execute(&descriptor).await {
                                    Ok(payload) => {
                                        tracing::info!(id, status = payload.status, elapsed_ms = payload.elapsed.as_millis() as u64, "Request completed");
                                        NetworkResponse::Completed { id, payload }
                                    }
                                    Err(e) => {
                                        tracing::info!(id, error = %e, "Request failed");
                                        NetworkResponse::Failed {
                                            id,
                                            message: e.to_string(),
                                        }
                                    }
                                };
                                let _ = response_tx.send(response);
                            });
                        }

                        Some(NetworkCommand::Shutdown) | None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }
}
