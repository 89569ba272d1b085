//! Shared test utilities for wk-client unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::UpstreamError;
use crate::http::{Upstream, check_body};

/// In-memory upstream serving canned JSON per URL and counting calls.
///
/// Clones share responses and counters. Unknown URLs answer 404.
#[derive(Clone, Default)]
pub struct FakeUpstream {
    responses: Arc<Mutex<HashMap<String, Value>>>,
    calls: Arc<Mutex<HashMap<String, usize>>>,
}

impl FakeUpstream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, url: &str, body: Value) -> Self {
        self.responses.lock().unwrap().insert(url.to_string(), body);
        self
    }

    pub fn calls(&self, url: &str) -> usize {
        self.calls.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }
}

impl Upstream for FakeUpstream {
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        *self.calls.lock().unwrap().entry(url.to_string()).or_default() += 1;
        let body = self.responses.lock().unwrap().get(url).cloned();
        match body {
            Some(body) => check_body(body),
            None => Err(UpstreamError::Api {
                status: 404,
                message: format!("no fixture for {url}"),
            }),
        }
    }
}
