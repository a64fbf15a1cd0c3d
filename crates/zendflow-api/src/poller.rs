//! Poll-until-terminal for asynchronous server operations
//!
//! Deployments, restarts and cluster joins are accepted by the server and
//! finish later. [`Poller::until`] re-runs a status check at a fixed interval
//! until a caller-supplied predicate accepts the result. There is no retry
//! limit and, unless a timeout is configured, no deadline: the call blocks
//! until the operation reaches a terminal state. A failing status check ends
//! the wait immediately with that error.

use crate::error::{Result, ZendError};
use crate::progress::PollProgress;
use std::sync::Arc;
use std::time::Duration;
use zendflow_config::PollConfig;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Blocking wait between two status checks
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Clone)]
pub struct Poller {
    interval: Duration,
    timeout: Option<Duration>,
    sleeper: Arc<dyn Sleeper>,
    show_progress: bool,
}

impl Default for Poller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl From<&PollConfig> for Poller {
    fn from(config: &PollConfig) -> Self {
        let poller = Self::new(config.interval());
        match config.timeout() {
            Some(timeout) => poller.with_timeout(timeout),
            None => poller,
        }
    }
}

impl Poller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timeout: None,
            sleeper: Arc::new(ThreadSleeper),
            show_progress: true,
        }
    }

    /// Give up with [`ZendError::PollTimeout`] once the next wait would exceed `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Run `check` until `is_terminal` accepts its result, sleeping `interval`
    /// between checks. Returns the terminal value.
    pub fn until<T, F, P>(&self, operation: &str, mut check: F, mut is_terminal: P) -> Result<T>
    where
        F: FnMut() -> Result<T>,
        P: FnMut(&T) -> bool,
    {
        let progress = if self.show_progress {
            PollProgress::new(operation)
        } else {
            PollProgress::hidden(operation)
        };

        let mut attempts: u32 = 0;
        let mut waited = Duration::ZERO;

        loop {
            let value = match check() {
                Ok(value) => value,
                Err(e) => {
                    progress.abandon(&e.to_string());
                    return Err(e);
                }
            };
            attempts += 1;
            progress.tick(attempts);

            if is_terminal(&value) {
                progress.finish();
                tracing::debug!("{} finished after {} checks", operation, attempts);
                return Ok(value);
            }

            if let Some(timeout) = self.timeout {
                if waited + self.interval > timeout {
                    progress.abandon("timed out");
                    return Err(ZendError::PollTimeout {
                        operation: operation.to_string(),
                        attempts,
                        waited,
                    });
                }
            }

            tracing::debug!("{} still in progress (check #{})", operation, attempts);
            self.sleeper.sleep(self.interval);
            waited += self.interval;
        }
    }
}
