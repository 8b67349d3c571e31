//! Streaming execute transport.
//!
//! Issues the POST, then drives the chunked response body through the SSE
//! parser on a spawned task, forwarding decoded events over a channel.
//! The consumer side is [`AgentStream`]: poll events until a terminal one
//! arrives, or abort. After `abort()` no further event is observable —
//! cancellation never surfaces as a done or error event.

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{ApiClient, ORG_HEADER};
use crate::error::{CreddyError, CreddyResult};
use crate::models::ExecuteRequest;
use crate::sse::{SseParser, StreamEvent};

/// A live streaming execute call.
#[derive(Debug)]
pub struct AgentStream {
    events: mpsc::Receiver<StreamEvent>,
    task: JoinHandle<()>,
    aborted: bool,
}

impl AgentStream {
    /// Wait for the next event. Returns `None` once the stream has ended
    /// or been aborted.
    pub async fn next_event(&mut self) -> Option<StreamEvent> {
        if self.aborted {
            return None;
        }
        self.events.recv().await
    }

    /// Non-blocking poll, for UI tick loops. Returns `None` when no event
    /// is ready (or the stream is finished/aborted).
    pub fn try_next_event(&mut self) -> Option<StreamEvent> {
        if self.aborted {
            return None;
        }
        self.events.try_recv().ok()
    }

    /// Cancel the stream. The reader task is torn down and any queued
    /// events become unreachable; this is silent by design.
    pub fn abort(&mut self) {
        self.aborted = true;
        self.task.abort();
        self.events.close();
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }
}

impl Drop for AgentStream {
    fn drop(&mut self) {
        // An abandoned stream (modal closed, value dropped) must not keep
        // reading the socket.
        self.task.abort();
    }
}

impl ApiClient {
    /// `POST /v1/agents/{code}/execute/stream` — same semantics as the
    /// single-turn execute, delivered as `token`/`done`/`error` SSE events.
    pub fn execute_agent_stream(
        &self,
        code: &str,
        request: &ExecuteRequest,
    ) -> CreddyResult<AgentStream> {
        let org_id = self.org().require()?.to_string();
        let url = self.url(&format!("/v1/agents/{}/execute/stream", code));
        let http = self.http().clone();
        let body = serde_json::to_value(request)?;

        let (tx, rx) = mpsc::channel(64);
        let task = tokio::spawn(async move {
            run_stream(http, url, org_id, body, tx).await;
        });

        Ok(AgentStream {
            events: rx,
            task,
            aborted: false,
        })
    }
}

async fn run_stream(
    http: reqwest::Client,
    url: String,
    org_id: String,
    body: serde_json::Value,
    tx: mpsc::Sender<StreamEvent>,
) {
    let resp = match http
        .post(&url)
        .header(ORG_HEADER, &org_id)
        .json(&body)
        .send()
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            let _ = tx
                .send(StreamEvent::Error {
                    message: CreddyError::from(e).to_string(),
                })
                .await;
            return;
        }
    };

    if !resp.status().is_success() {
        let err = ApiClient::status_error(resp).await;
        let _ = tx
            .send(StreamEvent::Error {
                message: err.to_string(),
            })
            .await;
        return;
    }

    let mut stream = resp.bytes_stream();
    let mut parser = SseParser::new();

    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(bytes) => {
                for record in parser.feed(&String::from_utf8_lossy(&bytes)) {
                    let Some(event) = StreamEvent::from_record(&record) else {
                        debug!(event = %record.event, "Skipping unrecognized stream record");
                        continue;
                    };
                    let terminal = event.is_terminal();
                    if tx.send(event).await.is_err() {
                        // Receiver dropped; stop reading.
                        return;
                    }
                    if terminal {
                        return;
                    }
                }
            }
            Err(e) => {
                let _ = tx
                    .send(StreamEvent::Error {
                        message: e.to_string(),
                    })
                    .await;
                return;
            }
        }
    }

    // Body ended without a terminal event.
    let _ = tx
        .send(StreamEvent::Error {
            message: CreddyError::StreamClosed.to_string(),
        })
        .await;
}
