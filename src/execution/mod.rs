//! # Execution Layer
//!
//! Record decoding and the worker pool that runs it: a round-robin
//! dispatcher feeding single-slot worker mailboxes.

pub mod dispatcher;
pub mod mailbox;
pub mod record_parser;
pub mod worker;

pub use dispatcher::{DispatchSummary, RoundRobinDispatcher};
pub use mailbox::{Mailbox, RawRecord};
pub use record_parser::{DecodedResult, RecordParser};
pub use worker::{ResultSink, Worker, WorkerState};
