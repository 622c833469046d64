//! # Aggregation
//!
//! Phone-keyed consolidation of decoded records into debtors, and the
//! end-of-run report.

pub mod aggregator;
pub mod debtor;
pub mod report;

pub use aggregator::Aggregator;
pub use debtor::{Debtor, DebtorId, DebtorSummary};
pub use report::Report;
