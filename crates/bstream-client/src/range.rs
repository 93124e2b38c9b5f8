use std::{fmt, str::FromStr};

use bstream_protos::BlockRef;
use thiserror::Error;

/// Requested block range `[start, end)`. An `end` of 0 means the range is
/// open-ended and the stream never completes on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    start: u64,
    end: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("range {0:?} should be of the form <start>-<stop> or <start>-")]
    MissingSeparator(String),

    #[error("range start {0:?} is not a valid block number")]
    InvalidStart(String),

    #[error("range end {0:?} is not a valid block number")]
    InvalidEnd(String),

    #[error("range start {start} comes at or after end {end}")]
    StartAfterEnd { start: u64, end: u64 },
}

impl BlockRange {
    pub fn new(start: u64, end: u64) -> Result<Self, RangeError> {
        if end != 0 && start >= end {
            return Err(RangeError::StartAfterEnd { start, end });
        }

        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn is_open_ended(&self) -> bool {
        self.end == 0
    }

    /// Whether a stream that last delivered `last_block` has covered the
    /// whole range. Open-ended ranges are never covered.
    pub fn covered_by(&self, last_block: Option<&BlockRef>) -> bool {
        if self.is_open_ended() {
            return false;
        }

        match last_block {
            Some(block) => block.num >= self.end - 1,
            None => false,
        }
    }
}

impl FromStr for BlockRange {
    type Err = RangeError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        // Spaces are accepted anywhere, so "150 000 000 - 150 010 000" parses.
        let cleaned: String = input.chars().filter(|c| !c.is_whitespace()).collect();

        let (start, end) = cleaned
            .split_once('-')
            .ok_or_else(|| RangeError::MissingSeparator(input.to_string()))?;

        let start: u64 = start
            .parse()
            .map_err(|_| RangeError::InvalidStart(start.to_string()))?;

        let end: u64 = if end.is_empty() {
            0
        } else {
            end.parse()
                .map_err(|_| RangeError::InvalidEnd(end.to_string()))?
        };

        Self::new(start, end)
    }
}

impl fmt::Display for BlockRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
