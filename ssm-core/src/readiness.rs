//! Bounded wait for external capabilities.
//!
//! The Google Maps script and the CSV loader arrive independently of the
//! WASM bundle. Loads poll every capability on a fixed interval and give
//! up after a fixed number of attempts, naming the capability that never
//! showed up.

use crate::capability::{CapabilityKind, Sleeper};
use crate::error::LoadError;
use serde::Deserialize;
use std::time::Duration;

/// Poll interval and attempt ceiling. The defaults bound the wait at 5 s.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ReadinessPolicy {
    pub poll_interval_ms: u64,
    pub max_attempts: u32,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            max_attempts: 50,
        }
    }
}

impl ReadinessPolicy {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Longest time a wait can take, in milliseconds.
    pub fn bound_ms(&self) -> u64 {
        self.poll_interval_ms * u64::from(self.max_attempts)
    }
}

/// A named readiness check.
pub struct Probe<'a> {
    pub kind: CapabilityKind,
    check: Box<dyn Fn() -> bool + 'a>,
}

impl<'a> Probe<'a> {
    pub fn new(kind: CapabilityKind, check: impl Fn() -> bool + 'a) -> Self {
        Self {
            kind,
            check: Box::new(check),
        }
    }

    pub fn is_ready(&self) -> bool {
        (self.check)()
    }
}

/// Resolve once every probe reports ready, or fail with
/// `LoadError::CapabilityTimeout` for the first probe still pending after
/// `max_attempts` sleeps.
pub async fn wait_until_ready(
    probes: &[Probe<'_>],
    policy: &ReadinessPolicy,
    sleeper: &dyn Sleeper,
) -> Result<(), LoadError> {
    let mut attempts = 0u32;
    loop {
        let Some(pending) = probes.iter().find(|p| !p.is_ready()) else {
            log::info!("readiness: all capabilities ready after {} polls", attempts);
            return Ok(());
        };
        if attempts >= policy.max_attempts {
            log::error!(
                "readiness: {} still unavailable after {} polls",
                pending.kind,
                attempts
            );
            return Err(LoadError::CapabilityTimeout {
                capability: pending.kind,
                waited_ms: policy.poll_interval_ms * u64::from(attempts),
            });
        }
        sleeper.sleep(policy.poll_interval()).await;
        attempts += 1;
    }
}
