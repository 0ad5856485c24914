//! Bounded-retry fetch state machine.
//!
//! ```text
//! Idle ─start─▶ Fetching ─Success──────────────▶ Done
//!                 │  ▲
//!                 │  └──resume── RetryWait
//!                 │                 ▲
//!                 ├─RateLimited─────┘   (while retries remain)
//!                 └─anything else / budget spent ─▶ Failed
//! ```
//!
//! The machine owns no I/O; the client performs each attempt and the wait,
//! feeding outcomes back in.

use std::time::Duration;

use citegraph_core::Error;

/// How many times, and after what delay, a rate-limited fetch is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// One retry after `delay`.
    pub fn single(delay: Duration) -> Self {
        Self {
            max_retries: 1,
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::single(Duration::from_secs(1))
    }
}

/// Result of a single HTTP attempt, as seen by the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    RateLimited,
    NotFound,
    Status(u16),
    Transport(String),
    Decode(String),
}

/// Why a fetch ended in `Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    RateLimited { attempts: u32 },
    NotFound,
    Status(u16),
    Transport(String),
    Decode(String),
}

impl FetchFailure {
    pub fn into_error(self, paper_id: &str) -> Error {
        match self {
            Self::NotFound => Error::NotFound(format!("paper {}", paper_id)),
            Self::RateLimited { attempts } => Error::Provider(format!(
                "rate limited fetching {} after {} attempts",
                paper_id, attempts
            )),
            Self::Status(code) => {
                Error::Provider(format!("API error {} fetching {}", code, paper_id))
            }
            Self::Transport(msg) => {
                Error::Provider(format!("request for {} failed: {}", paper_id, msg))
            }
            Self::Decode(msg) => {
                Error::Provider(format!("unreadable response for {}: {}", paper_id, msg))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    Fetching { attempt: u32 },
    RetryWait { attempt: u32, delay: Duration },
    Done,
    Failed(FetchFailure),
}

/// Drives one fetch through its retry policy.
#[derive(Debug)]
pub struct FetchMachine {
    policy: RetryPolicy,
    state: FetchState,
}

impl FetchMachine {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            state: FetchState::Idle,
        }
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.state, FetchState::Done | FetchState::Failed(_))
    }

    /// Idle → Fetching. No-op from any other state.
    pub fn start(&mut self) -> &FetchState {
        if self.state == FetchState::Idle {
            self.state = FetchState::Fetching { attempt: 1 };
        }
        &self.state
    }

    /// Feed the outcome of the current attempt. Ignored unless Fetching.
    pub fn record(&mut self, outcome: AttemptOutcome) -> &FetchState {
        let FetchState::Fetching { attempt } = self.state else {
            return &self.state;
        };

        self.state = match outcome {
            AttemptOutcome::Success => FetchState::Done,
            AttemptOutcome::RateLimited if attempt <= self.policy.max_retries => {
                FetchState::RetryWait {
                    attempt,
                    delay: self.policy.delay,
                }
            }
            AttemptOutcome::RateLimited => {
                FetchState::Failed(FetchFailure::RateLimited { attempts: attempt })
            }
            AttemptOutcome::NotFound => FetchState::Failed(FetchFailure::NotFound),
            AttemptOutcome::Status(code) => FetchState::Failed(FetchFailure::Status(code)),
            AttemptOutcome::Transport(msg) => FetchState::Failed(FetchFailure::Transport(msg)),
            AttemptOutcome::Decode(msg) => FetchState::Failed(FetchFailure::Decode(msg)),
        };
        &self.state
    }

    /// RetryWait → Fetching with the next attempt number, once the wait is over.
    pub fn resume(&mut self) -> &FetchState {
        if let FetchState::RetryWait { attempt, .. } = self.state {
            self.state = FetchState::Fetching {
                attempt: attempt + 1,
            };
        }
        &self.state
    }
}
