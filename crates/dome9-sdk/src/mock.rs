//! Scripted in-memory transport
//!
//! Replays queued responses in order and records every request it sees.

use crate::client::{Request, Response, Transport};
use crate::error::{Dome9Error, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<Response>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response
    pub fn push(&self, response: Response) {
        self.push_result(Ok(response));
    }

    /// Queue a JSON response with the given status
    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push(Response::new(status, body.to_string()));
    }

    /// Queue an empty-bodied response
    pub fn push_status(&self, status: u16) {
        self.push(Response::new(status, ""));
    }

    /// Queue a network-level failure (no response received)
    pub fn push_no_response(&self) {
        self.push_result(Err(Dome9Error::Transport("connection reset".to_string())));
    }

    fn push_result(&self, result: Result<Response>) {
        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(result);
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<Request> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: &Request) -> Result<Response> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.clone());

        self.script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| {
                Err(Dome9Error::Transport(format!(
                    "no scripted response for {} {}",
                    request.method, request.path
                )))
            })
    }
}
