//! # Debtor Aggregator
//!
//! Merges decoded records into a phone-keyed set of debtors. Every merge runs
//! as one critical section under a single lock, so results may arrive from
//! any worker in any order.
//!
//! A record joins the debtor owning the first of its phones that is already
//! known. Two debtors that already exist are never merged afterwards, even if
//! a later record carries phones of both; the final grouping therefore depends
//! on input order.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Instant;
use tracing::warn;

use crate::aggregation::debtor::{Debtor, DebtorId, DebtorSummary};
use crate::aggregation::report::Report;
use crate::execution::{DecodedResult, ResultSink};

#[derive(Debug, Default)]
struct AggregatorState {
    debtors: Vec<Debtor>,
    phone_index: HashMap<String, DebtorId>,
    records: u64,
}

impl AggregatorState {
    fn merge(&mut self, result: DecodedResult) {
        self.records += 1;

        let target = result
            .phones
            .iter()
            .find_map(|phone| self.phone_index.get(phone).copied());

        let Some(id) = target else {
            let id = DebtorId(self.debtors.len());
            for phone in &result.phones {
                self.phone_index.insert(phone.clone(), id);
            }
            self.debtors
                .push(Debtor::new(result.company, result.phones, result.debt));
            return;
        };

        let debtor = &mut self.debtors[id.0];
        debtor.companies.insert(result.company);
        for phone in result.phones {
            if !debtor.has_phone(&phone) {
                self.phone_index.insert(phone.clone(), id);
                debtor.phones.insert(phone);
            }
        }
        if !debtor.add_debt(result.debt) {
            warn!(debtor = id.0, debt = debtor.debt, "Debt total clamped at i64 bounds");
        }
    }
}

#[derive(Debug)]
pub struct Aggregator {
    state: Mutex<AggregatorState>,
    started_at: Instant,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    /// Aggregator whose report measures elapsed time from `started_at`
    pub fn started_at(started_at: Instant) -> Self {
        Self {
            state: Mutex::new(AggregatorState::default()),
            started_at,
        }
    }

    /// Merge one decoded record into the debtor set
    pub fn process(&self, result: DecodedResult) {
        self.state.lock().merge(result);
    }

    pub fn record_count(&self) -> u64 {
        self.state.lock().records
    }

    pub fn debtor_count(&self) -> usize {
        self.state.lock().debtors.len()
    }

    /// Debtor currently owning `phone`
    pub fn debtor_for_phone(&self, phone: &str) -> Option<DebtorSummary> {
        let state = self.state.lock();
        state
            .phone_index
            .get(phone)
            .map(|id| DebtorSummary::from(&state.debtors[id.0]))
    }

    /// Whether every debtor phone is indexed, and every index entry points at
    /// a debtor holding that phone
    ///
    /// A phone may sit in two debtors' sets when a record linked them; the
    /// index then points at the debtor that absorbed it last.
    pub fn is_phone_index_consistent(&self) -> bool {
        let state = self.state.lock();
        let owns = |phone: &str, id: &DebtorId| {
            state
                .debtors
                .get(id.0)
                .is_some_and(|debtor| debtor.has_phone(phone))
        };

        let debtors_indexed = state.debtors.iter().all(|debtor| {
            debtor.phones.iter().all(|phone| {
                state
                    .phone_index
                    .get(phone)
                    .is_some_and(|id| owns(phone, id))
            })
        });

        debtors_indexed
            && state
                .phone_index
                .iter()
                .all(|(phone, id)| owns(phone, id))
    }

    /// Snapshot the debtor set; rendering happens after the lock is released
    pub fn report(&self) -> Report {
        let (total_records, debtors) = {
            let state = self.state.lock();
            (
                state.records,
                state.debtors.iter().map(DebtorSummary::from).collect(),
            )
        };

        Report {
            total_records,
            debtors,
            elapsed: self.started_at.elapsed(),
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSink for Aggregator {
    fn process(&self, result: DecodedResult) {
        Aggregator::process(self, result);
    }
}
