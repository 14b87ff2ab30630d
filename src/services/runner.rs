//! Background request runner
//!
//! Runs backend requests on a tokio runtime and hands the results back to the
//! UI thread through a channel that is drained on every tick.

use super::api::{ApiClient, ApiRequest, ApiResponse};
use super::error::ApiError;
use crate::model::Ticket;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Result of one dispatched request
#[derive(Debug)]
pub struct Completion {
    pub ticket: Ticket,
    pub request: ApiRequest,
    pub result: Result<ApiResponse, ApiError>,
}

enum Backend {
    Live { runtime: Runtime, client: ApiClient },
    /// Records requests instead of sending them
    Offline { sent: Vec<(Ticket, ApiRequest)> },
}

/// Request runner service
pub struct RequestRunner {
    backend: Backend,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    in_flight: usize,
}

impl RequestRunner {
    pub fn new(client: ApiClient) -> anyhow::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        Ok(Self::with_backend(Backend::Live { runtime, client }))
    }

    /// Runner that never touches the network
    pub fn offline() -> Self {
        Self::with_backend(Backend::Offline { sent: Vec::new() })
    }

    fn with_backend(backend: Backend) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            backend,
            tx,
            rx,
            in_flight: 0,
        }
    }

    /// Dispatch `request`; its completion arrives through `poll`
    pub fn spawn(&mut self, ticket: Ticket, request: ApiRequest) {
        debug!(?ticket, request = %request, "dispatching request");
        self.in_flight += 1;

        match self.backend {
            Backend::Live {
                ref runtime,
                ref client,
            } => {
                let client = client.clone();
                let tx = self.tx.clone();
                runtime.spawn(async move {
                    let result = client.execute(&request).await;
                    let _ = tx.send(Completion {
                        ticket,
                        request,
                        result,
                    });
                });
            }
            Backend::Offline { ref mut sent } => sent.push((ticket, request)),
        }
    }

    /// Drain every completion that has arrived since the last poll
    pub fn poll(&mut self) -> Vec<Completion> {
        let mut done = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(completion) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    done.push(completion);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        done
    }

    /// Requests dispatched but not yet polled
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Requests recorded by an offline runner
    pub fn sent(&self) -> &[(Ticket, ApiRequest)] {
        match self.backend {
            Backend::Offline { ref sent } => sent,
            Backend::Live { .. } => &[],
        }
    }

    /// Inject a completion as if a request had finished
    #[cfg(test)]
    pub fn complete(
        &mut self,
        ticket: Ticket,
        request: ApiRequest,
        result: Result<ApiResponse, ApiError>,
    ) {
        let _ = self.tx.send(Completion {
            ticket,
            request,
            result,
        });
    }
}
