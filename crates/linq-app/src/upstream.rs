use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use serde::Serialize;
use std::{
    ops::Range,
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use crate::retry::Sleeper;

pub const UPSTREAM_DATA: &str = "Upstream data received successfully.";
pub const UPSTREAM_FAILURE: &str = "Upstream service error encountered.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamPayload {
    pub data: String,
}

/// One failed attempt. Recoverable; the retry controller decides what happens next.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{reason}")]
pub struct UpstreamError {
    pub reason: String,
}

impl UpstreamError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
pub trait Upstream: Send + Sync {
    async fn call(&self) -> Result<UpstreamPayload, UpstreamError>;
}

/// In-process stand-in for a remote dependency: coin-flip outcome after a random latency.
pub struct SimulatedUpstream<R = StdRng> {
    rng: Mutex<R>,
    sleeper: Arc<dyn Sleeper>,
    success_probability: f64,
    latency_ms: Range<u64>,
}

impl SimulatedUpstream<StdRng> {
    pub fn from_entropy(sleeper: Arc<dyn Sleeper>) -> Self {
        Self::new(StdRng::from_entropy(), sleeper)
    }
}

impl<R: RngCore + Send> SimulatedUpstream<R> {
    pub fn new(rng: R, sleeper: Arc<dyn Sleeper>) -> Self {
        Self {
            rng: Mutex::new(rng),
            sleeper,
            success_probability: 0.5,
            latency_ms: 100..300,
        }
    }

    /// Clamped to `[0, 1]`; NaN falls back to a fair coin.
    pub fn with_success_probability(mut self, p: f64) -> Self {
        self.success_probability = if p.is_nan() { 0.5 } else { p.clamp(0.0, 1.0) };
        self
    }
}

#[async_trait]
impl<R: RngCore + Send> Upstream for SimulatedUpstream<R> {
    async fn call(&self) -> Result<UpstreamPayload, UpstreamError> {
        let (succeed, latency_ms) = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            let succeed = rng.gen_bool(self.success_probability);
            let latency_ms = rng.gen_range(self.latency_ms.clone());
            (succeed, latency_ms)
        };

        self.sleeper.sleep(Duration::from_millis(latency_ms)).await;

        if succeed {
            Ok(UpstreamPayload {
                data: UPSTREAM_DATA.to_string(),
            })
        } else {
            Err(UpstreamError::new(UPSTREAM_FAILURE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::RecordingSleeper;

    #[tokio::test]
    async fn latency_stays_in_range() {
        let sleeper = Arc::new(RecordingSleeper::default());
        let upstream = SimulatedUpstream::new(StdRng::seed_from_u64(7), sleeper.clone());

        for _ in 0..200 {
            let _ = upstream.call().await;
        }

        let waits = sleeper.waits();
        assert_eq!(waits.len(), 200);
        for wait in waits {
            assert!(wait >= Duration::from_millis(100), "{wait:?} too short");
            assert!(wait < Duration::from_millis(300), "{wait:?} too long");
        }
    }

    #[tokio::test]
    async fn fair_coin_yields_both_outcomes() {
        let upstream = SimulatedUpstream::new(
            StdRng::seed_from_u64(42),
            Arc::new(RecordingSleeper::default()),
        );

        let mut successes = 0;
        for _ in 0..200 {
            match upstream.call().await {
                Ok(payload) => {
                    assert_eq!(payload.data, UPSTREAM_DATA);
                    successes += 1;
                }
                Err(e) => assert_eq!(e.to_string(), UPSTREAM_FAILURE),
            }
        }

        assert!((50..150).contains(&successes), "successes = {successes}");
    }

    #[tokio::test]
    async fn forced_probability_is_deterministic() {
        let sleeper = Arc::new(RecordingSleeper::default());

        let always = SimulatedUpstream::new(StdRng::seed_from_u64(1), sleeper.clone())
            .with_success_probability(1.0);
        let never = SimulatedUpstream::new(StdRng::seed_from_u64(1), sleeper)
            .with_success_probability(0.0);

        for _ in 0..20 {
            assert!(always.call().await.is_ok());
            assert!(never.call().await.is_err());
        }
    }

    #[tokio::test]
    async fn nan_probability_behaves_like_a_fair_coin() {
        let upstream = SimulatedUpstream::new(
            StdRng::seed_from_u64(42),
            Arc::new(RecordingSleeper::default()),
        )
        .with_success_probability(f64::NAN);

        assert_eq!(upstream.success_probability, 0.5);
        for _ in 0..20 {
            let _ = upstream.call().await;
        }
    }
}
