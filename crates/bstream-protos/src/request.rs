// Copyright 2025 Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::bstream::v1::{BlockDetails, BlocksRequestV2, ForkStep};

impl BlocksRequestV2 {
    /// Create a stream request for the range `[start_block_num, stop_block_num)`,
    /// where a `stop_block_num` of 0 means the stream never ends on its own.
    pub fn new(start_block_num: u64, stop_block_num: u64) -> Self {
        Self {
            start_block_num: start_block_num as i64,
            stop_block_num,
            ..Default::default()
        }
    }

    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.start_cursor = cursor.into();
        self
    }

    pub fn with_filter(mut self, expr: impl Into<String>) -> Self {
        self.include_filter_expr = expr.into();
        self
    }

    pub fn with_fork_steps(mut self, steps: impl IntoIterator<Item = ForkStep>) -> Self {
        self.fork_steps = steps.into_iter().map(|step| step as i32).collect();
        self
    }

    pub fn with_details(mut self, details: BlockDetails) -> Self {
        self.details = details as i32;
        self
    }
}
