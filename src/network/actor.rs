//! Network actor - runs API calls in the Tokio async runtime

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::messages::{NetworkCommand, NetworkResponse, RequestKind};
use crate::network::client::CounterClient;

/// Network actor that executes counter API commands
pub struct NetworkActor {
    client: CounterClient,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
}

impl NetworkActor {
    pub fn new(client: CounterClient, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client,
            response_tx,
            active_requests: JoinSet::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => {
                            tracing::info!(pending = self.active_requests.len(), "Network actor shutting down");
                            self.active_requests.abort_all();
                            break;
                        }
                        Some(cmd) => self.spawn(cmd),
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.active_requests.join_next() => {}
            }
        }
    }

    fn spawn(&mut self, cmd: NetworkCommand) {
        let client = self.client.clone();
        let response_tx = self.response_tx.clone();

        self.active_requests.spawn(async move {
            let response = execute(&client, cmd).await;
            if let Some(response) = response {
                let _ = response_tx.send(response);
            }
        });
    }
}

/// Run a single command against the API
pub async fn execute(client: &CounterClient, cmd: NetworkCommand) -> Option<NetworkResponse> {
    let response = match cmd {
        NetworkCommand::FetchCount { id } => {
            tracing::info!(id, "GET /count");
            match client.fetch_count().await {
                Ok(count) => NetworkResponse::Count { id, count },
                Err(e) => failure(id, RequestKind::FetchCount, e),
            }
        }
        NetworkCommand::Apply { id, action } => {
            tracing::info!(id, path = action.path(), ?action, "POST");
            match client.apply(action).await {
                Ok(outcome) => NetworkResponse::Applied {
                    id,
                    action,
                    count: outcome.count,
                    message: outcome.message,
                },
                Err(e) => failure(id, RequestKind::Apply(action), e),
            }
        }
        NetworkCommand::FetchHistory { id } => {
            tracing::info!(id, "GET /count/history");
            match client.fetch_history().await {
                Ok(items) => NetworkResponse::History { id, items },
                Err(e) => failure(id, RequestKind::FetchHistory, e),
            }
        }
        NetworkCommand::Shutdown => return None,
    };
    Some(response)
}

fn failure(id: u64, kind: RequestKind, err: anyhow::Error) -> NetworkResponse {
    let message = format!("{:#}", err);
    tracing::error!(id, ?kind, error = %message, "Request failed");
    NetworkResponse::Error { id, kind, message }
}
