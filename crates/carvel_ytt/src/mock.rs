//! Mock renderer for testing.
//!
//! Provides a configurable implementation of the [`Renderer`] trait so that
//! manifest assertions can be exercised without a ytt installation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::config::YttOptions;
use crate::error::{YttError, YttResult};
use crate::runner::{RenderOutput, Renderer};

/// Predefined response for a render call.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub duration_ms: u64,
}

impl MockResponse {
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
            duration_ms: 50,
        }
    }

    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
            duration_ms: 50,
        }
    }
}

#[derive(Debug, Clone)]
struct CapturedCall {
    method: &'static str,
    options: Option<YttOptions>,
}

/// Mock renderer.
///
/// Captures every call and replays the configured responses in order,
/// wrapping around when they run out.
#[derive(Clone)]
pub struct MockRenderer {
    available: Arc<RwLock<bool>>,
    version: Arc<RwLock<String>>,
    responses: Arc<RwLock<Vec<MockResponse>>>,
    response_index: Arc<AtomicUsize>,
    captured_calls: Arc<RwLock<Vec<CapturedCall>>>,
    /// Spawn failure message to return instead of a response.
    simulate_spawn_failure: Arc<RwLock<Option<String>>>,
}

impl Default for MockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRenderer {
    pub fn new() -> Self {
        Self {
            available: Arc::new(RwLock::new(true)),
            version: Arc::new(RwLock::new("ytt version 0.0.0-mock".to_string())),
            responses: Arc::new(RwLock::new(Vec::new())),
            response_index: Arc::new(AtomicUsize::new(0)),
            captured_calls: Arc::new(RwLock::new(Vec::new())),
            simulate_spawn_failure: Arc::new(RwLock::new(None)),
        }
    }

    pub fn set_available(self, available: bool) -> Self {
        *self.available.write() = available;
        self
    }

    /// Add a response for the next render call.
    pub fn add_response(self, response: MockResponse) -> Self {
        self.responses.write().push(response);
        self
    }

    pub fn with_responses(self, responses: Vec<MockResponse>) -> Self {
        *self.responses.write() = responses;
        self
    }

    /// Make every call fail as if the executable were missing.
    pub fn simulate_spawn_failure(self, message: impl Into<String>) -> Self {
        *self.simulate_spawn_failure.write() = Some(message.into());
        self
    }

    pub fn call_count(&self) -> usize {
        self.captured_calls.read().len()
    }

    /// Options passed to every render call, in call order.
    pub fn rendered_options(&self) -> Vec<YttOptions> {
        self.captured_calls
            .read()
            .iter()
            .filter(|c| c.method == "render")
            .filter_map(|c| c.options.clone())
            .collect()
    }

    fn record_call(&self, method: &'static str, options: Option<&YttOptions>) {
        self.captured_calls.write().push(CapturedCall {
            method,
            options: options.cloned(),
        });
    }

    fn next_response(&self) -> MockResponse {
        let responses = self.responses.read();
        if responses.is_empty() {
            return MockResponse::success("");
        }
        let index = self.response_index.fetch_add(1, Ordering::SeqCst);
        responses
            .get(index % responses.len())
            .cloned()
            .unwrap_or_else(|| MockResponse::success(""))
    }

    fn check_spawn_failure(&self) -> YttResult<()> {
        if let Some(msg) = self.simulate_spawn_failure.read().clone() {
            return Err(YttError::Spawn {
                binary: "mock-ytt".to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, msg),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Renderer for MockRenderer {
    async fn is_available(&self) -> YttResult<bool> {
        self.record_call("is_available", None);
        Ok(*self.available.read())
    }

    async fn version(&self) -> YttResult<String> {
        self.record_call("version", None);
        self.check_spawn_failure()?;
        Ok(self.version.read().clone())
    }

    async fn render(&self, options: &YttOptions) -> YttResult<RenderOutput> {
        self.record_call("render", Some(options));
        self.check_spawn_failure()?;

        let response = self.next_response();
        let started_at = Utc::now();
        let finished_at =
            started_at + chrono::Duration::milliseconds(response.duration_ms as i64);

        Ok(RenderOutput::new(
            response.exit_code == 0,
            response.exit_code,
            &response.stdout,
            &response.stderr,
            started_at,
            finished_at,
        ))
    }
}
