#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Debt Consolidator
//!
//! Concurrent consolidation of newline-delimited debt records into distinct debtors.
//!
//! ## Overview
//!
//! Each input record names a company, a debt amount and one or more phone numbers.
//! Records sharing a phone number are treated as the same debtor: their debts are
//! summed and their companies and phones unioned.
//!
//! ## Architecture
//!
//! - A producer reads lines and hands candidate records to a
//!   [`RoundRobinDispatcher`](execution::RoundRobinDispatcher).
//! - A fixed pool of [`Worker`](execution::Worker)s, each with a single-slot
//!   [`Mailbox`](execution::Mailbox), decodes records in parallel.
//! - Decoded results are merged by one [`Aggregator`](aggregation::Aggregator)
//!   behind a single coarse lock, tolerating any arrival order.
//!
//! The mailbox is deliberately lossy: a record still pending when the next one
//! is assigned to the same worker is replaced. Replacements are counted in the
//! [`DispatchSummary`](execution::DispatchSummary).
//!
//! Merging is first-match and online: a record joins the debtor of its first
//! known phone, and debtors that already exist are never merged later.
//!
//! ## Module Organization
//!
//! - [`execution`] - Record parsing, mailboxes, workers and dispatch
//! - [`aggregation`] - Debtor merging and the final report
//! - [`ingestion`] - Line reading and candidate filtering
//! - [`pipeline`] - End-to-end run coordination
//! - [`config`] - Layered configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use debt_consolidator::{ConsolidatorConfig, Pipeline};
//!
//! # fn example() -> debt_consolidator::Result<()> {
//! let config = ConsolidatorConfig::default().with_input_path("debts.json");
//! let outcome = Pipeline::new(config)?.run_file()?;
//! print!("{}", outcome.report);
//! # Ok(())
//! # }
//! ```

pub mod aggregation;
pub mod config;
pub mod constants;
pub mod error;
pub mod execution;
pub mod ingestion;
pub mod logging;
pub mod pipeline;

pub use aggregation::{Aggregator, DebtorSummary, Report};
pub use config::ConsolidatorConfig;
pub use error::{ConsolidatorError, Result};
pub use execution::{
    DecodedResult, DispatchSummary, RecordParser, ResultSink, RoundRobinDispatcher, Worker,
};
pub use pipeline::{Pipeline, PipelineOutcome};
