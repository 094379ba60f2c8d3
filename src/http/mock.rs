//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::time::Instant;

use crate::error::TransportError;
use crate::http::client::Transport;
use crate::http::request::RestRequest;
use crate::http::response::RestResponse;

/// What the next round-trip does.
#[derive(Debug, Clone)]
pub enum Step {
    /// Respond immediately with this status.
    Status(u16),
    /// Respond with this status after a delay.
    Delayed(Duration, u16),
    /// Never respond.
    Hang,
    /// Fail at the transport level.
    Fail(&'static str),
}

/// Plays `steps` in order, then repeats `fallback` forever.
pub struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    fallback: Step,
    started: Mutex<Vec<Instant>>,
}

impl ScriptedTransport {
    pub fn new(steps: impl IntoIterator<Item = Step>, fallback: Step) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
            fallback,
            started: Mutex::new(Vec::new()),
        }
    }

    pub fn always(step: Step) -> Self {
        Self::new([], step)
    }

    /// Number of round-trips started so far.
    pub fn attempts(&self) -> usize {
        self.started.lock().unwrap().len()
    }

    /// Instants at which each round-trip started.
    pub fn start_times(&self) -> Vec<Instant> {
        self.started.lock().unwrap().clone()
    }

    fn next_step(&self) -> Step {
        self.started.lock().unwrap().push(Instant::now());
        self.steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

fn respond(status: u16) -> RestResponse {
    let status = StatusCode::from_u16(status).unwrap();
    RestResponse::new(status, format!("{{\"status\":{}}}", status.as_u16()))
}

impl Transport for ScriptedTransport {
    async fn send(&self, _request: &RestRequest) -> Result<RestResponse, TransportError> {
        match self.next_step() {
            Step::Status(status) => Ok(respond(status)),
            Step::Delayed(delay, status) => {
                tokio::time::sleep(delay).await;
                Ok(respond(status))
            }
            Step::Hang => std::future::pending().await,
            Step::Fail(message) => Err(TransportError::Connection(message.to_string())),
        }
    }
}
