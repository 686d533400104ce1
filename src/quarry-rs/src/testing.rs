//! In-memory transport for unit tests.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::transport::{Transport, TransportError, TransportRequest, TransportResponse};

/// Replays canned responses in order and records every request it receives.
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, String>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse::from_bytes(status, body)));
        self
    }

    /// Status arrives, then the body stream breaks after `partial`.
    pub fn respond_interrupted(self, status: u16, partial: &[u8], reason: &str) -> Self {
        let chunks = vec![
            Ok(partial.to_vec()),
            Err(TransportError::Other(reason.to_string())),
        ];
        self.responses.lock().unwrap().push_back(Ok(TransportResponse {
            status,
            body: stream::iter(chunks).boxed(),
        }));
        self
    }

    pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
        self.respond(status, body.to_string())
    }

    pub fn fail(self, reason: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no canned response left");

        next.map_err(TransportError::Other)
    }
}

impl TransportRequest {
    /// Request body as UTF-8 text
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_ref()
            .map(|b| String::from_utf8(b.clone()).expect("request body is not UTF-8"))
    }

    pub fn body_json(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .map(|b| serde_json::from_slice(b).expect("request body is not JSON"))
    }
}
