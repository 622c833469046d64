//! # Worker Mailbox
//!
//! Single-slot hand-off buffer between the dispatcher and one worker. A new
//! delivery replaces any record the worker has not picked up yet; replaced
//! records are counted but not recovered.

use parking_lot::{Condvar, Mutex};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

/// One raw input line together with its dispatch sequence number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub sequence: u64,
    pub bytes: Vec<u8>,
}

impl RawRecord {
    pub fn new(sequence: u64, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            sequence,
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    pending: Option<RawRecord>,
    stop_requested: bool,
}

#[derive(Debug, Default)]
pub struct Mailbox {
    slot: Mutex<Slot>,
    ready: Condvar,
    assigned: AtomicU64,
    overwritten: AtomicU64,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a record in the slot, returning the unconsumed record it replaced
    pub fn deliver(&self, record: RawRecord) -> Option<RawRecord> {
        self.assigned.fetch_add(1, Ordering::Relaxed);

        let replaced = {
            let mut slot = self.slot.lock();
            slot.pending.replace(record)
        };
        self.ready.notify_one();

        if replaced.is_some() {
            self.overwritten.fetch_add(1, Ordering::Relaxed);
        }
        replaced
    }

    pub fn request_stop(&self) {
        self.slot.lock().stop_requested = true;
        self.ready.notify_one();
    }

    pub fn is_stop_requested(&self) -> bool {
        self.slot.lock().stop_requested
    }

    /// Consume records until a stop is requested and the slot is empty
    ///
    /// `handle` runs with the slot lock held, so a delivery to this mailbox
    /// waits until the record in flight has been fully handled. The first
    /// error returned by `handle` ends the loop.
    pub fn drain_until_stopped<F>(&self, mut handle: F) -> Result<()>
    where
        F: FnMut(RawRecord) -> Result<()>,
    {
        let mut slot = self.slot.lock();
        loop {
            if let Some(record) = slot.pending.take() {
                handle(record)?;
                continue;
            }
            if slot.stop_requested {
                return Ok(());
            }
            self.ready.wait(&mut slot);
        }
    }

    /// Total records delivered to this mailbox
    pub fn assigned(&self) -> u64 {
        self.assigned.load(Ordering::Relaxed)
    }

    /// Records replaced before the worker picked them up
    pub fn overwritten(&self) -> u64 {
        self.overwritten.load(Ordering::Relaxed)
    }
}
