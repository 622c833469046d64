//! # Round-Robin Dispatcher
//!
//! Assigns raw records to a fixed pool of workers in strict rotation. The
//! rotation is driven by one shared atomic counter, so concurrent callers
//! still spread work evenly without further coordination.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{ConsolidatorError, Result};
use crate::execution::mailbox::RawRecord;
use crate::execution::worker::{ResultSink, Worker};

/// Totals reported when the dispatcher shuts down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Records accepted by `schedule`
    pub scheduled: u64,
    /// Records decoded and delivered by workers
    pub processed: u64,
    /// Records replaced in a mailbox before their worker picked them up
    pub overwritten: u64,
}

pub struct RoundRobinDispatcher {
    workers: Vec<Worker>,
    next: AtomicUsize,
    aborted: Arc<AtomicBool>,
}

impl RoundRobinDispatcher {
    /// Spawn `worker_count` workers that all deliver into `sink`
    pub fn new(worker_count: usize, sink: Arc<dyn ResultSink>) -> Result<Self> {
        if worker_count == 0 {
            return Err(ConsolidatorError::Configuration(
                "dispatcher needs at least one worker".to_string(),
            ));
        }

        let aborted = Arc::new(AtomicBool::new(false));
        let workers = (0..worker_count)
            .map(|id| Worker::spawn(id, Arc::clone(&sink), Arc::clone(&aborted)))
            .collect::<Result<Vec<_>>>()?;

        info!(worker_count, "Round-robin dispatcher started");

        Ok(Self {
            workers,
            next: AtomicUsize::new(0),
            aborted,
        })
    }

    /// Write `raw` into the next worker's mailbox
    ///
    /// Refuses input with [`ConsolidatorError::Aborted`] once any worker has
    /// failed; the underlying error is returned by [`stop`](Self::stop).
    pub fn schedule(&self, raw: &[u8]) -> Result<()> {
        if self.is_aborted() {
            return Err(ConsolidatorError::Aborted);
        }

        let sequence = self.next.fetch_add(1, Ordering::Relaxed);
        let worker = &self.workers[sequence % self.workers.len()];
        worker.assign(RawRecord::new(sequence as u64, raw));
        Ok(())
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Acquire)
    }

    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    /// Total `schedule` calls that reached a mailbox
    pub fn scheduled(&self) -> u64 {
        self.workers.iter().map(Worker::assigned).sum()
    }

    /// Stop every worker in order, waiting for each to drain
    ///
    /// All workers are stopped even if one of them failed; the first failure
    /// is returned afterwards.
    pub fn stop(&self) -> Result<DispatchSummary> {
        let mut processed = 0;
        let mut first_error = None;

        for worker in &self.workers {
            match worker.stop() {
                Ok(count) => processed += count,
                Err(err) => {
                    processed += worker.processed();
                    first_error.get_or_insert(err);
                }
            }
        }

        let summary = DispatchSummary {
            scheduled: self.scheduled(),
            processed,
            overwritten: self.workers.iter().map(Worker::overwritten).sum(),
        };

        if summary.overwritten > 0 {
            warn!(
                overwritten = summary.overwritten,
                "Records were replaced in worker mailboxes before being processed"
            );
        }
        info!(
            scheduled = summary.scheduled,
            processed = summary.processed,
            overwritten = summary.overwritten,
            "Dispatcher stopped"
        );

        match first_error {
            Some(err) => Err(err),
            None => Ok(summary),
        }
    }
}
