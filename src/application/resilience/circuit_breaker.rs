// src/application/resilience/circuit_breaker.rs
//! Three-state circuit breaker guarding a single downstream dependency.
//!
//! ```text
//! Closed --(failure_threshold consecutive failures)--> Open
//! Open   --(reset_timeout elapsed, next call)--------> HalfOpen (one trial call)
//! HalfOpen --(trial succeeds)--> Closed
//! HalfOpen --(trial fails)-----> Open
//! ```

use crate::application::error::{ApplicationError, ApplicationResult};
use parking_lot::Mutex;
use std::{fmt, future::Future, time::Duration};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub reset_timeout: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            reset_timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
            Self::HalfOpen => write!(f, "half-open"),
        }
    }
}

#[derive(Debug)]
struct Circuit {
    state: CircuitState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    trial_in_flight: bool,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    circuit: Mutex<Circuit>,
}

/// Clears the half-open trial flag if the trial call is dropped before it
/// reports an outcome, so the breaker cannot get stuck rejecting everything.
struct TrialGuard<'a> {
    breaker: &'a CircuitBreaker,
    armed: bool,
}

impl Drop for TrialGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.breaker.circuit.lock().trial_in_flight = false;
        }
    }
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            circuit: Mutex::new(Circuit {
                state: CircuitState::Closed,
                consecutive_failures: 0,
                opened_at: None,
                trial_in_flight: false,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> CircuitState {
        self.circuit.lock().state
    }

    pub fn consecutive_failures(&self) -> u32 {
        self.circuit.lock().consecutive_failures
    }

    /// Runs `operation` unless the circuit is open. An open circuit rejects
    /// with [`ApplicationError::ExternalService`] without running it.
    pub async fn call<F, Fut, T>(&self, operation: F) -> ApplicationResult<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApplicationResult<T>>,
    {
        let is_trial = self.admit()?;
        let mut guard = TrialGuard {
            breaker: self,
            armed: is_trial,
        };

        let outcome = operation().await;
        guard.armed = false;

        match &outcome {
            Ok(_) => self.record_success(),
            Err(_) => self.record_failure(),
        }
        outcome
    }

    /// Returns whether the admitted call is the half-open trial.
    fn admit(&self) -> ApplicationResult<bool> {
        let mut circuit = self.circuit.lock();
        match circuit.state {
            CircuitState::Closed => Ok(false),
            CircuitState::HalfOpen => {
                if circuit.trial_in_flight {
                    Err(self.rejection(None))
                } else {
                    circuit.trial_in_flight = true;
                    Ok(true)
                }
            }
            CircuitState::Open => {
                let elapsed = circuit.opened_at.map(|at| at.elapsed());
                match elapsed {
                    Some(elapsed) if elapsed < self.config.reset_timeout => Err(
                        self.rejection(Some(self.config.reset_timeout.saturating_sub(elapsed))),
                    ),
                    _ => {
                        circuit.state = CircuitState::HalfOpen;
                        circuit.trial_in_flight = true;
                        tracing::warn!(
                            breaker = %self.name,
                            from = %CircuitState::Open,
                            to = %CircuitState::HalfOpen,
                            "circuit breaker allowing trial call"
                        );
                        Ok(true)
                    }
                }
            }
        }
    }

    fn rejection(&self, retry_after: Option<Duration>) -> ApplicationError {
        let message = match retry_after {
            Some(wait) => format!("circuit breaker is open, retry in {} ms", wait.as_millis()),
            None => "circuit breaker is open, trial call in progress".to_string(),
        };
        ApplicationError::external(self.name.clone(), message)
    }

    fn record_success(&self) {
        let mut circuit = self.circuit.lock();
        circuit.consecutive_failures = 0;
        if circuit.state == CircuitState::HalfOpen {
            circuit.state = CircuitState::Closed;
            circuit.opened_at = None;
            circuit.trial_in_flight = false;
            tracing::info!(
                breaker = %self.name,
                from = %CircuitState::HalfOpen,
                to = %CircuitState::Closed,
                "circuit breaker recovered"
            );
        }
    }

    fn record_failure(&self) {
        let mut circuit = self.circuit.lock();
        circuit.consecutive_failures = circuit.consecutive_failures.saturating_add(1);

        match circuit.state {
            CircuitState::Closed => {
                if circuit.consecutive_failures >= self.config.failure_threshold {
                    circuit.state = CircuitState::Open;
                    circuit.opened_at = Some(Instant::now());
                    tracing::warn!(
                        breaker = %self.name,
                        from = %CircuitState::Closed,
                        to = %CircuitState::Open,
                        consecutive_failures = circuit.consecutive_failures,
                        "circuit breaker opened"
                    );
                }
            }
            CircuitState::HalfOpen => {
                circuit.state = CircuitState::Open;
                circuit.opened_at = Some(Instant::now());
                circuit.trial_in_flight = false;
                tracing::warn!(
                    breaker = %self.name,
                    from = %CircuitState::HalfOpen,
                    to = %CircuitState::Open,
                    "circuit breaker trial failed, reopening"
                );
            }
            // late failure of a call admitted before the circuit opened;
            // the cooldown still runs from the moment it opened
            CircuitState::Open => {}
        }
    }
}
