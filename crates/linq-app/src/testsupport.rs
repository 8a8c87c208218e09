//! Deterministic stand-ins for the upstream and the timer, shared by unit and
//! integration tests.

use async_trait::async_trait;
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, PoisonError,
    },
    time::Duration,
};

use crate::retry::Sleeper;
use crate::upstream::{Upstream, UpstreamError, UpstreamPayload};

/// Records every requested wait and returns immediately.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    waits: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn waits(&self) -> Vec<Duration> {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.waits
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}

/// Replays a fixed list of outcomes; once exhausted, repeats the fallback.
#[derive(Debug)]
pub struct ScriptedUpstream {
    script: Mutex<VecDeque<Result<UpstreamPayload, UpstreamError>>>,
    fallback: Result<UpstreamPayload, UpstreamError>,
    calls: AtomicUsize,
}

impl ScriptedUpstream {
    pub fn new(
        script: impl IntoIterator<Item = Result<UpstreamPayload, UpstreamError>>,
        fallback: Result<UpstreamPayload, UpstreamError>,
    ) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn always_ok(data: &str) -> Self {
        Self::new(std::iter::empty(), Ok(payload(data)))
    }

    pub fn always_failing() -> Self {
        Self::new(std::iter::empty(), Err(UpstreamError::new("scripted failure")))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Upstream for ScriptedUpstream {
    async fn call(&self) -> Result<UpstreamPayload, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}

pub fn payload(data: &str) -> UpstreamPayload {
    UpstreamPayload {
        data: data.to_string(),
    }
}

pub fn failure(reason: &str) -> UpstreamError {
    UpstreamError::new(reason)
}
