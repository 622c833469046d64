use std::fmt;
use std::time::Duration;

use crate::aggregation::debtor::DebtorSummary;

/// Final consolidation result, debtors in creation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub total_records: u64,
    pub debtors: Vec<DebtorSummary>,
    pub elapsed: Duration,
}

impl Report {
    pub fn debtor_count(&self) -> usize {
        self.debtors.len()
    }

    pub fn total_debt(&self) -> i128 {
        self.debtors.iter().map(|d| i128::from(d.debt)).sum()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "total: {}", self.total_records)?;
        writeln!(f, "total debtors: {}", self.debtors.len())?;
        writeln!(f, "total time: {:?}", self.elapsed)?;
        for debtor in &self.debtors {
            writeln!(f, "{}:", debtor.companies.join(", "))?;
            writeln!(f, "\t{}", debtor.phones.join(", "))?;
            writeln!(f, "\t{}", debtor.debt)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let report = Report {
            total_records: 3,
            debtors: vec![
                DebtorSummary {
                    companies: vec!["Acme".to_string(), "Acme Inc".to_string()],
                    phones: vec!["555".to_string(), "777".to_string()],
                    debt: 150,
                },
                DebtorSummary {
                    companies: vec!["Y".to_string()],
                    phones: vec!["2".to_string()],
                    debt: -20,
                },
            ],
            elapsed: Duration::from_millis(1500),
        };

        assert_eq!(
            report.to_string(),
            "total: 3\n\
             total debtors: 2\n\
             total time: 1.5s\n\
             Acme, Acme Inc:\n\
             \t555, 777\n\
             \t150\n\
             Y:\n\
             \t2\n\
             \t-20\n"
        );
        assert_eq!(report.total_debt(), 130);
    }
}
