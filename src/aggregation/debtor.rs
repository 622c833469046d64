use std::collections::BTreeSet;

/// Position of a debtor in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DebtorId(pub usize);

/// Companies and phones believed to be one real-world entity, with summed debt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Debtor {
    pub companies: BTreeSet<String>,
    pub phones: BTreeSet<String>,
    pub debt: i64,
}

impl Debtor {
    pub fn new(company: String, phones: impl IntoIterator<Item = String>, debt: i64) -> Self {
        Self {
            companies: BTreeSet::from([company]),
            phones: phones.into_iter().collect(),
            debt,
        }
    }

    pub fn has_phone(&self, phone: &str) -> bool {
        self.phones.contains(phone)
    }

    /// Add `amount`, clamping at the i64 bounds. Returns false if clamped.
    pub fn add_debt(&mut self, amount: i64) -> bool {
        match self.debt.checked_add(amount) {
            Some(total) => {
                self.debt = total;
                true
            }
            None => {
                self.debt = self.debt.saturating_add(amount);
                false
            }
        }
    }
}

/// Sorted, display-ready copy of a debtor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebtorSummary {
    pub companies: Vec<String>,
    pub phones: Vec<String>,
    pub debt: i64,
}

impl From<&Debtor> for DebtorSummary {
    fn from(debtor: &Debtor) -> Self {
        Self {
            companies: debtor.companies.iter().cloned().collect(),
            phones: debtor.phones.iter().cloned().collect(),
            debt: debtor.debt,
        }
    }
}
