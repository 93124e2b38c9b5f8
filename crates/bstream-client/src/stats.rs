use std::{
    collections::VecDeque,
    fmt,
    time::{Duration, Instant},
};

/// Monotonic counter with a sliding-window rate estimate.
#[derive(Debug)]
pub struct RateCounter {
    total: u64,
    window: Duration,
    events: VecDeque<(Instant, u64)>,
}

impl RateCounter {
    pub fn new(window: Duration) -> Self {
        Self {
            total: 0,
            window,
            events: VecDeque::new(),
        }
    }

    pub fn incr(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }

        let now = Instant::now();
        self.total += amount;
        self.events.push_back((now, amount));

        while let Some((at, _)) = self.events.front() {
            if now.duration_since(*at) <= self.window {
                break;
            }
            self.events.pop_front();
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Amount accumulated within the sliding window.
    pub fn rate(&self) -> u64 {
        let now = Instant::now();
        self.events
            .iter()
            .filter(|(at, _)| now.duration_since(*at) <= self.window)
            .map(|(_, amount)| amount)
            .sum()
    }
}

/// Counters for one whole consumer run. Totals only ever grow, across any
/// number of stream restarts.
#[derive(Debug)]
pub struct SessionStats {
    started_at: Instant,
    time_to_first_block: Option<Duration>,
    blocks_received: RateCounter,
    bytes_received: RateCounter,
    restarts: RateCounter,
}

impl SessionStats {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            time_to_first_block: None,
            blocks_received: RateCounter::new(Duration::from_secs(1)),
            bytes_received: RateCounter::new(Duration::from_secs(1)),
            restarts: RateCounter::new(Duration::from_secs(60)),
        }
    }

    pub fn record_block(&mut self, bytes: u64) {
        if self.time_to_first_block.is_none() {
            self.time_to_first_block = Some(self.started_at.elapsed());
        }

        self.blocks_received.incr(1);
        self.bytes_received.incr(bytes);
    }

    pub fn record_restart(&mut self) {
        self.restarts.incr(1);
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn blocks_total(&self) -> u64 {
        self.blocks_received.total()
    }

    pub fn bytes_total(&self) -> u64 {
        self.bytes_received.total()
    }

    pub fn restart_count(&self) -> u64 {
        self.restarts.total()
    }

    /// Blocks accumulated over the last second.
    pub fn block_rate(&self) -> u64 {
        self.blocks_received.rate()
    }

    /// Bytes accumulated over the last second.
    pub fn byte_rate(&self) -> u64 {
        self.bytes_received.rate()
    }

    pub fn time_to_first_block(&self) -> Option<Duration> {
        self.time_to_first_block
    }

    pub fn summary(&self) -> Summary {
        Summary {
            elapsed: self.elapsed(),
            time_to_first_block: self.time_to_first_block,
            blocks_total: self.blocks_total(),
            bytes_total: self.bytes_total(),
            restart_count: self.restart_count(),
        }
    }
}

impl Default for SessionStats {
    fn default() -> Self {
        Self::new()
    }
}

/// End-of-run report produced once the consumer terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub elapsed: Duration,
    pub time_to_first_block: Option<Duration>,
    pub blocks_total: u64,
    pub bytes_total: u64,
    pub restart_count: u64,
}

impl Summary {
    /// Overall per-minute rate; below one minute of elapsed time the total
    /// itself is reported, like the historical tooling did.
    fn per_minute(total: u64, elapsed: Duration) -> u64 {
        let minutes = elapsed.as_secs_f64() / 60.0;
        if minutes > 1.0 {
            (total as f64 / minutes) as u64
        } else {
            total
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Completed streaming")?;
        writeln!(f, "Duration: {:?}", self.elapsed)?;
        match self.time_to_first_block {
            Some(elapsed) => writeln!(f, "Time to first block: {elapsed:?}")?,
            None => writeln!(f, "Time to first block: n/a")?,
        }
        if self.restart_count > 0 {
            writeln!(f, "Restart count: {}", self.restart_count)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "Blocks received: {} blocks/min ({} total)",
            Self::per_minute(self.blocks_total, self.elapsed),
            self.blocks_total
        )?;
        write!(
            f,
            "Bytes received: {} bytes/min ({} total)",
            Self::per_minute(self.bytes_total, self.elapsed),
            self.bytes_total
        )
    }
}
