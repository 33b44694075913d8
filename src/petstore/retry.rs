//! Bounded retry policies for read operations.
//!
//! A policy is plain data: a total attempt budget and a backoff rule. The
//! delay computation is a pure function of the attempt number so it can be
//! tested without clocks or I/O; the client owns the actual sleeping.

use std::time::Duration;

/// Delay rule applied between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backoff {
    /// Same delay after every failed attempt.
    Fixed(Duration),
    /// Delay doubles per attempt, bounded by `cap`.
    Exponential {
        /// Delay after the first failed attempt.
        base: Duration,
        /// Upper bound on any single delay.
        cap: Duration,
    },
}

/// Retry budget for a single logical read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay rule between attempts.
    pub backoff: Backoff,
}

impl RetryPolicy {
    /// Policy with a constant inter-attempt delay.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Fixed(delay),
        }
    }

    /// Policy whose delay doubles per attempt up to `cap`.
    pub fn exponential(max_attempts: u32, base: Duration, cap: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Exponential { base, cap },
        }
    }

    /// Delay to sleep after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self.backoff {
            Backoff::Fixed(delay) => delay,
            Backoff::Exponential { base, cap } => {
                let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
                base.saturating_mul(factor).min(cap)
            }
        }
    }
}
