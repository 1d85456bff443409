use std::thread;
use std::time::Duration;

use crate::error::{NavigatorError, Result};

/// Seconds between two predicate evaluations unless configured otherwise.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;

/// Blocks the calling thread between polls.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Real wall-clock sleeping.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// When the poll budget counts as spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// Give up once elapsed time reaches the budget (attribute waits).
    Reached,
    /// Keep polling while elapsed time is within the budget (process waits).
    Exceeded,
}

impl Deadline {
    fn allows(self, elapsed_secs: u64, budget_secs: u64) -> bool {
        match self {
            Deadline::Reached => elapsed_secs < budget_secs,
            Deadline::Exceeded => elapsed_secs <= budget_secs,
        }
    }
}

/// How a successful poll went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOutcome {
    /// Number of predicate evaluations, the successful one included
    pub attempts: u32,
    /// Seconds slept before the predicate held
    pub elapsed_secs: u64,
}

/// Fixed-interval timeout loop behind the `wait_for_*` commands.
pub struct WaitPoller {
    interval_secs: u64,
    sleeper: Box<dyn Sleeper>,
}

impl Default for WaitPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL_SECS)
    }
}

impl WaitPoller {
    pub fn new(interval_secs: u64) -> Self {
        Self::with_sleeper(interval_secs, Box::new(ThreadSleeper))
    }

    /// An interval of zero is raised to one second so elapsed time advances.
    pub fn with_sleeper(interval_secs: u64, sleeper: Box<dyn Sleeper>) -> Self {
        Self {
            interval_secs: interval_secs.max(1),
            sleeper,
        }
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    /// Evaluate `predicate` every interval until it holds or the budget runs out.
    ///
    /// The millisecond timeout is truncated to whole seconds, so a budget
    /// that is not a multiple of the interval may under- or overrun by up
    /// to one interval. The predicate is always evaluated at least once.
    /// Predicate errors end the wait immediately.
    pub fn poll_until<F>(
        &mut self,
        what: &str,
        timeout_ms: u64,
        deadline: Deadline,
        mut predicate: F,
    ) -> Result<PollOutcome>
    where
        F: FnMut() -> Result<bool>,
    {
        let budget_secs = timeout_ms / 1000;
        let mut elapsed_secs = 0;
        let mut attempts = 0;

        loop {
            attempts += 1;
            if predicate()? {
                return Ok(PollOutcome {
                    attempts,
                    elapsed_secs,
                });
            }

            elapsed_secs += self.interval_secs;
            if !deadline.allows(elapsed_secs, budget_secs) {
                return Err(NavigatorError::Timeout {
                    what: what.to_string(),
                    seconds: budget_secs,
                });
            }

            self.sleeper.sleep(Duration::from_secs(self.interval_secs));
        }
    }
}
