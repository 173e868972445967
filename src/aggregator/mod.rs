//! Parallel paginated fetch-and-merge engine
//!
//! Fetching a few hundred statuses through a paginated, latency-bound remote
//! endpoint is dominated by round-trip time, so the engine fans one worker
//! task out per page and multiplexes their results into a single collector:
//!
//! - **Workers** each fetch exactly one page and offer every record to a
//!   bounded channel with a non-blocking send; a full buffer drops the record
//!   rather than block the worker. Each worker then reports the number of
//!   records it *offered* (not the number accepted) on a completion channel.
//! - The **collector** waits on record arrivals, completion reports, and a
//!   periodic liveness tick, re-evaluating the job deadline after every wake.
//!   The job is naturally done only when every worker has reported and every
//!   offered record has been observed.
//! - The **merge stage** sorts the accumulated records by id descending,
//!   removes duplicates from overlapping pages, and caps the result at the
//!   requested count.
//!
//! A failed page degrades yield but never fails the job; only a deadline
//! overrun does, and a timed-out job discards everything it collected. On
//! timeout the workers are abandoned, not cancelled: the channels are sized
//! so an unread worker can never block, and late results fall into closed
//! channels.

mod merge;


use crate::config::AggregatorConfig;
use crate::error::{Error, Result};
use crate::fetcher::PageFetcher;
use crate::types::{Status, Subject};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Per-job completion accounting.
///
/// The invariant cross-checks the two channels: every worker must have
/// reported, and every record the workers offered must have been collected.
/// A record silently dropped by a full buffer therefore keeps the job from
/// completing naturally; only the deadline path can end it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct CompletionState {
    pub(crate) completed_workers: usize,
    pub(crate) records_reported: usize,
    pub(crate) records_collected: usize,
}

impl CompletionState {
    pub(crate) fn is_complete(&self, num_workers: usize) -> bool {
        self.completed_workers == num_workers && self.records_collected == self.records_reported
    }
}

/// Concurrent timeline aggregation engine
///
/// Owns a [`PageFetcher`] and fans page fetches out across worker tasks. See
/// the [module docs](self) for the coordination model.
pub struct TimelineAggregator {
    fetcher: Arc<dyn PageFetcher>,
    config: AggregatorConfig,
}

impl TimelineAggregator {
    /// Create an aggregator over a page fetcher.
    pub fn new(fetcher: Arc<dyn PageFetcher>, config: AggregatorConfig) -> Self {
        Self { fetcher, config }
    }

    /// Fetch up to `desired_count` of the subject's most recent statuses.
    ///
    /// Pages are fetched concurrently, merged, sorted by id descending, and
    /// deduplicated. The result may be shorter than `desired_count` when the
    /// timeline is short or individual pages failed; that is not an error.
    ///
    /// `timeout` of `None` waits for natural completion without bound. With a
    /// deadline set, an overrun returns [`Error::Timeout`] and discards all
    /// collected data; the deadline is re-checked on every collector wake-up
    /// and at least once per configured tick, so it can overshoot by roughly
    /// one tick interval.
    pub async fn fetch_timeline(
        &self,
        subject: &Subject,
        desired_count: usize,
        timeout: Option<Duration>,
    ) -> Result<Vec<Status>> {
        self.config.validate()?;
        if desired_count == 0 {
            return Err(Error::InvalidCount);
        }
        if let Subject::ScreenName(name) = subject
            && name.is_empty()
        {
            return Err(Error::InvalidSubject(
                "screen name must not be empty".to_string(),
            ));
        }

        let page_size = self.config.page_size;
        let num_workers = desired_count
            .div_ceil(page_size)
            .min(self.config.max_concurrent_pages);

        tracing::debug!(
            subject = %subject,
            desired_count,
            num_workers,
            page_size,
            "Spawning page workers"
        );

        // Record buffer capacity equals the maximum the workers can produce,
        // so an abandoned worker can always finish its non-blocking offers.
        let (record_tx, mut record_rx) = mpsc::channel::<Status>(num_workers * page_size);
        // One completion report per worker; capacity num_workers means the
        // send never blocks even with no reader left.
        let (done_tx, mut done_rx) = mpsc::channel::<usize>(num_workers);

        for page in 1..=num_workers {
            let fetcher = Arc::clone(&self.fetcher);
            let subject = subject.clone();
            let record_tx = record_tx.clone();
            let done_tx = done_tx.clone();
            tokio::spawn(async move {
                fetch_page_worker(fetcher, subject, page, page_size, record_tx, done_tx).await;
            });
        }
        drop(record_tx);
        drop(done_tx);

        let collected = self
            .collect(num_workers, &mut record_rx, &mut done_rx, timeout)
            .await?;
        Ok(merge::merge_sort_dedup(collected, desired_count))
    }

    /// Collector loop: drain both channels, tick for liveness, enforce the
    /// deadline, and stop once the completion invariant holds.
    async fn collect(
        &self,
        num_workers: usize,
        record_rx: &mut mpsc::Receiver<Status>,
        done_rx: &mut mpsc::Receiver<usize>,
        timeout: Option<Duration>,
    ) -> Result<Vec<Status>> {
        let started = Instant::now();
        let mut state = CompletionState::default();
        // Pre-sized to the maximum possible yield; growth past this is impossible.
        let mut collected = Vec::with_capacity(num_workers * self.config.page_size);

        let mut tick = tokio::time::interval(self.config.tick_interval);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                Some(record) = record_rx.recv() => {
                    collected.push(record);
                    state.records_collected += 1;
                }
                Some(count) = done_rx.recv() => {
                    state.completed_workers += 1;
                    state.records_reported += count;
                }
                _ = tick.tick() => {}
            }

            // Deadline first: a timed-out job never returns data, even if the
            // same wake-up would also have satisfied the completion invariant.
            if let Some(limit) = timeout {
                let elapsed = started.elapsed();
                if elapsed > limit {
                    tracing::warn!(
                        ?elapsed,
                        ?limit,
                        collected = collected.len(),
                        completed_workers = state.completed_workers,
                        "Timeline fetch timed out, discarding partial data"
                    );
                    return Err(Error::Timeout { elapsed, limit });
                }
            }

            if state.is_complete(num_workers) {
                break;
            }
        }

        tracing::debug!(
            num_workers,
            records = collected.len(),
            elapsed = ?started.elapsed(),
            "All page workers accounted for"
        );
        Ok(collected)
    }
}

/// One worker: fetch a single page and forward its records.
///
/// Channel send errors are ignored: after a job timeout the receivers are
/// gone and late results have no observer.
async fn fetch_page_worker(
    fetcher: Arc<dyn PageFetcher>,
    subject: Subject,
    page: usize,
    page_size: usize,
    record_tx: mpsc::Sender<Status>,
    done_tx: mpsc::Sender<usize>,
) {
    let records = match fetcher.fetch_page(&subject, page, page_size).await {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(page, error = %e, "Page fetch failed, reporting zero records");
            let _ = done_tx.send(0).await;
            return;
        }
    };

    let offered = records.len();
    let mut dropped = 0usize;
    for record in records {
        if record_tx.try_send(record).is_err() {
            dropped += 1;
        }
    }
    if dropped > 0 {
        tracing::warn!(page, dropped, "Record buffer full, dropped trailing records");
    }

    // Report what was offered, not what was accepted; the collector
    // cross-checks this against the records that actually arrived.
    let _ = done_tx.send(offered).await;
}
