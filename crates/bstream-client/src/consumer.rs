use std::time::{Duration, Instant};

use bstream_protos::{Block, BlockRef, BlocksRequestV2};
use futures::StreamExt;
use prost::Message;
use tokio::sync::watch;
use tracing::{info, trace, warn};

use crate::{
    auth::CredentialProvider,
    config::{ConsumerConfig, ResumeStrategy},
    error::ConsumerError,
    sink::BlockSink,
    stats::{SessionStats, Summary},
    transport::BlockStreamTransport,
};

/// Consumes one block stream over a requested range, reconnecting and
/// resuming from the last acknowledged position whenever the stream drops
/// before the range is covered.
///
/// The effective start of any reconnect attempt is
/// `max(range.start, last processed block + 1)`, so no gap ever opens, while
/// delivery across a reconnect boundary stays at-least-once. Each retry
/// cycle, whether the stream failed to open or dropped mid-flight, counts as
/// exactly one restart.
pub struct ResumableConsumer<T, A> {
    transport: T,
    credentials: A,
    config: ConsumerConfig,
    sink: Option<Box<dyn BlockSink>>,
    stats: SessionStats,
}

impl<T, A> ResumableConsumer<T, A>
where
    T: BlockStreamTransport,
    A: CredentialProvider,
{
    pub fn new(transport: T, credentials: A, config: ConsumerConfig) -> Self {
        Self {
            transport,
            credentials,
            config,
            sink: None,
            stats: SessionStats::new(),
        }
    }

    /// Forward every decoded block to `sink` in addition to counting it.
    pub fn with_sink(mut self, sink: Box<dyn BlockSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Stream the configured range to completion.
    ///
    /// Terminates successfully when the range is covered or `shutdown` is
    /// raised; fails fast on credential and payload-decode errors, and on an
    /// exhausted retry budget when one was configured.
    pub async fn run(
        mut self,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<Summary, ConsumerError> {
        let mut cursor = String::new();
        let mut last_block: Option<BlockRef> = None;
        let mut delay = self.config.retry.delay;
        let mut attempts_left = self.config.retry.max_attempts;
        let mut next_status = Instant::now() + self.config.status_interval;

        info!(
            range = %self.config.range,
            filter = %self.config.filter,
            "starting block stream"
        );

        'session: loop {
            if *shutdown.borrow() {
                info!("shutdown requested, stopping stream");
                break 'session;
            }

            let credential = self.credentials.credential().await?;
            let request = self.next_request(&cursor, last_block.as_ref());

            let opened = self.transport.open(request, credential).await;
            let mut stream = match opened {
                Ok(stream) => stream,
                Err(err) => {
                    warn!(
                        %err,
                        cursor = %cursor,
                        retry_in = ?delay,
                        "unable to open block stream, will retry"
                    );
                    if !self
                        .pause_before_retry(&mut shutdown, &mut delay, &mut attempts_left)
                        .await?
                    {
                        break 'session;
                    }
                    continue 'session;
                }
            };

            loop {
                match stream.next().await {
                    Some(Ok(response)) => {
                        let received_bytes = response.encoded_len() as u64;
                        let next_cursor = response.cursor.clone();
                        let block = Block::try_from(response)?;
                        let block_ref = block.block_ref();

                        trace!(
                            block = %block_ref,
                            previous = %block.previous_ref(),
                            cursor = %next_cursor,
                            "block received"
                        );

                        cursor = next_cursor;
                        last_block = Some(block_ref);
                        self.stats.record_block(received_bytes);

                        if let Some(sink) = self.sink.as_mut() {
                            sink.write_block(&block)?;
                        }

                        let now = Instant::now();
                        if now >= next_status {
                            info!(
                                blocks = self.stats.blocks_total(),
                                blocks_per_sec = self.stats.block_rate(),
                                bytes = self.stats.bytes_total(),
                                bytes_per_sec = self.stats.byte_rate(),
                                "stream blocks progress"
                            );
                            next_status = now + self.config.status_interval;
                        }
                    }
                    Some(Err(status)) => {
                        warn!(
                            %status,
                            cursor = %cursor,
                            last_block = ?last_block,
                            retry_in = ?delay,
                            "stream encountered a remote error, will retry"
                        );
                        break;
                    }
                    None => {
                        // An open-ended stream only ends when the server is
                        // done, so a clean end always completes the run.
                        if self.config.range.is_open_ended()
                            || self.config.range.covered_by(last_block.as_ref())
                        {
                            break 'session;
                        }
                        warn!(
                            last_block = ?last_block,
                            range = %self.config.range,
                            retry_in = ?delay,
                            "stream ended before the requested range was covered, will retry"
                        );
                        break;
                    }
                }
            }

            if !self
                .pause_before_retry(&mut shutdown, &mut delay, &mut attempts_left)
                .await?
            {
                break 'session;
            }
        }

        if let Some(sink) = self.sink.as_mut() {
            sink.finish()?;
        }

        info!("completed streaming");
        Ok(self.stats.summary())
    }

    fn next_request(&self, cursor: &str, last_block: Option<&BlockRef>) -> BlocksRequestV2 {
        let start = match last_block {
            Some(block) => self.config.range.start().max(block.num + 1),
            None => self.config.range.start(),
        };

        let mut request = BlocksRequestV2::new(start, self.config.range.end())
            .with_filter(self.config.filter.clone())
            .with_fork_steps(self.config.fork_mode.steps())
            .with_details(self.config.details.into());

        if self.config.resume == ResumeStrategy::Cursor && !cursor.is_empty() {
            request = request.with_cursor(cursor);
        }

        request
    }

    /// Record one restart and wait out the retry delay. Returns `Ok(false)`
    /// when shutdown was raised during the pause.
    async fn pause_before_retry(
        &mut self,
        shutdown: &mut watch::Receiver<bool>,
        delay: &mut Duration,
        attempts_left: &mut Option<u32>,
    ) -> Result<bool, ConsumerError> {
        self.stats.record_restart();

        if let Some(left) = attempts_left {
            if *left == 0 {
                return Err(ConsumerError::RetriesExhausted {
                    attempts: self.config.retry.max_attempts.unwrap_or(0),
                });
            }
            *left -= 1;
        }

        tokio::select! {
            _ = tokio::time::sleep(*delay) => {}
            _ = wait_for_shutdown(shutdown) => {
                return Ok(false);
            }
        }

        if let Some(factor) = self.config.retry.backoff {
            *delay = delay.mul_f64(factor);
        }

        Ok(true)
    }
}

/// Resolves once shutdown is raised; pends forever when the sender side is
/// gone, so a dropped handle never cuts a retry pause short.
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    loop {
        if shutdown.changed().await.is_err() {
            futures::future::pending::<()>().await;
        }
        if *shutdown.borrow() {
            return;
        }
    }
}
