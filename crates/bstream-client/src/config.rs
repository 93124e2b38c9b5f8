use std::time::Duration;

use bstream_protos::{BlockDetails, ForkStep};

use crate::range::BlockRange;

pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_STATUS_INTERVAL: Duration = Duration::from_secs(15);

/// Everything one consumer run needs to know; there is no process-wide
/// configuration state.
#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    pub range: BlockRange,
    /// Server-side inclusion filter expression, passed through uninterpreted.
    pub filter: String,
    pub fork_mode: ForkMode,
    pub details: DetailLevel,
    pub resume: ResumeStrategy,
    pub retry: RetryPolicy,
    /// Wall-clock interval between progress log lines.
    pub status_interval: Duration,
}

impl ConsumerConfig {
    pub fn new(range: BlockRange, filter: impl Into<String>) -> Self {
        Self {
            range,
            filter: filter.into(),
            fork_mode: ForkMode::default(),
            details: DetailLevel::default(),
            resume: ResumeStrategy::default(),
            retry: RetryPolicy::default(),
            status_interval: DEFAULT_STATUS_INTERVAL,
        }
    }
}

/// Which fork-handling steps the server should deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForkMode {
    /// Only blocks that passed the irreversibility threshold.
    #[default]
    IrreversibleOnly,
    /// Live head blocks, delivered as new/undo steps.
    Live,
}

impl ForkMode {
    pub fn steps(&self) -> Vec<ForkStep> {
        match self {
            ForkMode::IrreversibleOnly => vec![ForkStep::StepIrreversible],
            ForkMode::Live => vec![ForkStep::StepNew, ForkStep::StepUndo],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    /// Important fields only: ids, numbers, inputs and outputs.
    #[default]
    Light,
    /// Full blocks including all trace fields.
    Full,
}

impl From<DetailLevel> for BlockDetails {
    fn from(level: DetailLevel) -> Self {
        match level {
            DetailLevel::Light => BlockDetails::BlockDetailsLight,
            DetailLevel::Full => BlockDetails::BlockDetailsFull,
        }
    }
}

/// How a reconnect attempt tells the server where to pick up.
///
/// Some servers have been observed to mishandle resumption by opaque cursor
/// after a fork-aware disconnect; `BlockNumber` resumes by number alone and
/// leaves the cursor out of the request entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResumeStrategy {
    /// Send the last received opaque cursor alongside the start block.
    #[default]
    Cursor,
    /// Send only the advanced start block number.
    BlockNumber,
}

/// Reconnect behavior after a stream drop. The default retries forever with
/// a fixed delay; bounded attempts and multiplicative backoff are opt-in, as
/// long-running consumers are expected to ride out extended outages.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: Option<u32>,
    /// Factor applied to the delay after every attempt, e.g. 2.0 to double.
    pub backoff: Option<f64>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: DEFAULT_RETRY_DELAY,
            max_attempts: None,
            backoff: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fork_modes_map_to_steps() {
        assert_eq!(
            ForkMode::IrreversibleOnly.steps(),
            vec![ForkStep::StepIrreversible]
        );
        assert_eq!(
            ForkMode::Live.steps(),
            vec![ForkStep::StepNew, ForkStep::StepUndo]
        );
    }

    #[test]
    fn defaults_match_long_standing_behavior() {
        let config = ConsumerConfig::new("100-105".parse().unwrap(), "");
        assert_eq!(config.fork_mode, ForkMode::IrreversibleOnly);
        assert_eq!(config.details, DetailLevel::Light);
        assert_eq!(config.resume, ResumeStrategy::Cursor);
        assert_eq!(config.retry.delay, DEFAULT_RETRY_DELAY);
        assert!(config.retry.max_attempts.is_none());
        assert!(config.retry.backoff.is_none());
    }
}
