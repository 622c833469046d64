//! # Parse Worker
//!
//! A worker owns a [`RecordParser`] and a [`Mailbox`] and runs on its own
//! thread: take the pending record, decode it, hand the result to the sink.
//! At most one record is in flight per worker.

use crossbeam::channel::{self, Receiver};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error};

use crate::error::{ConsolidatorError, Result};
use crate::execution::mailbox::{Mailbox, RawRecord};
use crate::execution::record_parser::{DecodedResult, RecordParser};

/// Destination for decoded records
pub trait ResultSink: Send + Sync {
    fn process(&self, result: DecodedResult);
}

/// Worker lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkerState {
    Running = 0,
    Stopping = 1,
    Stopped = 2,
}

impl From<u8> for WorkerState {
    fn from(value: u8) -> Self {
        match value {
            0 => WorkerState::Running,
            1 => WorkerState::Stopping,
            _ => WorkerState::Stopped,
        }
    }
}

#[derive(Debug)]
struct WorkerShared {
    mailbox: Mailbox,
    state: AtomicU8,
    processed: AtomicU64,
}

pub struct Worker {
    id: usize,
    shared: Arc<WorkerShared>,
    completion: Mutex<Option<Receiver<Result<()>>>>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Worker {
    /// Spawn a worker thread delivering into `sink`
    ///
    /// `abort` is raised when this worker hits a malformed record so the
    /// dispatcher can refuse further input.
    pub fn spawn(id: usize, sink: Arc<dyn ResultSink>, abort: Arc<AtomicBool>) -> Result<Self> {
        let shared = Arc::new(WorkerShared {
            mailbox: Mailbox::new(),
            state: AtomicU8::new(WorkerState::Running as u8),
            processed: AtomicU64::new(0),
        });
        let (done_tx, done_rx) = channel::bounded(1);

        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name(format!("parse-worker-{id}"))
            .spawn(move || {
                let parser = RecordParser::new();
                debug!(worker_id = id, "Worker started");

                let outcome = thread_shared.mailbox.drain_until_stopped(|record: RawRecord| {
                    let result = parser.parse(record.sequence, &record.bytes)?;
                    thread_shared.processed.fetch_add(1, Ordering::Relaxed);
                    sink.process(result);
                    Ok(())
                });

                if let Err(ref err) = outcome {
                    abort.store(true, Ordering::Release);
                    error!(worker_id = id, error = %err, "Worker aborted");
                }
                thread_shared
                    .state
                    .store(WorkerState::Stopped as u8, Ordering::Release);
                debug!(
                    worker_id = id,
                    processed = thread_shared.processed.load(Ordering::Relaxed),
                    "Worker stopped"
                );

                // Receiver is only gone if the worker handle itself was dropped
                let _ = done_tx.send(outcome);
            })?;

        Ok(Self {
            id,
            shared,
            completion: Mutex::new(Some(done_rx)),
            handle: Mutex::new(Some(handle)),
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn state(&self) -> WorkerState {
        WorkerState::from(self.shared.state.load(Ordering::Acquire))
    }

    /// Hand a record to this worker, replacing any record still pending
    pub fn assign(&self, record: RawRecord) {
        self.shared.mailbox.deliver(record);
    }

    /// Records decoded and delivered to the sink
    pub fn processed(&self) -> u64 {
        self.shared.processed.load(Ordering::Relaxed)
    }

    pub fn assigned(&self) -> u64 {
        self.shared.mailbox.assigned()
    }

    pub fn overwritten(&self) -> u64 {
        self.shared.mailbox.overwritten()
    }

    /// Request a stop and block until the worker has drained its mailbox
    ///
    /// Returns the number of records processed, or the fatal error that
    /// ended the worker early. Calling `stop` again returns the count.
    pub fn stop(&self) -> Result<u64> {
        let Some(completion) = self.completion.lock().take() else {
            return Ok(self.processed());
        };

        let _ = self.shared.state.compare_exchange(
            WorkerState::Running as u8,
            WorkerState::Stopping as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
        self.shared.mailbox.request_stop();

        let outcome = completion
            .recv()
            .unwrap_or(Err(ConsolidatorError::WorkerPanicked { worker_id: self.id }));

        if let Some(handle) = self.handle.lock().take() {
            let _ = handle.join();
        }
        self.shared
            .state
            .store(WorkerState::Stopped as u8, Ordering::Release);

        outcome.map(|()| self.processed())
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        self.shared.mailbox.request_stop();
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("processed", &self.processed())
            .finish()
    }
}
