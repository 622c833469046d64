//! # Consolidation Pipeline
//!
//! Wires ingestion, the worker pool and the aggregator together for one run:
//! feed every candidate line, stop the workers once input is exhausted, then
//! take the report. A fatal error anywhere ends the run without a report.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

use crate::aggregation::{Aggregator, Report};
use crate::config::ConsolidatorConfig;
use crate::error::{ConsolidatorError, Result};
use crate::execution::{DispatchSummary, RoundRobinDispatcher};
use crate::ingestion::{is_candidate, RecordReader};

/// Everything a successful run produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    pub summary: DispatchSummary,
    pub report: Report,
}

pub struct Pipeline {
    config: ConsolidatorConfig,
    aggregator: Arc<Aggregator>,
    dispatcher: RoundRobinDispatcher,
}

impl Pipeline {
    /// Validate `config` and start the worker pool
    pub fn new(config: ConsolidatorConfig) -> Result<Self> {
        config.validate()?;

        let aggregator = Arc::new(Aggregator::started_at(Instant::now()));
        let dispatcher = RoundRobinDispatcher::new(config.worker_count, aggregator.clone())?;

        Ok(Self {
            config,
            aggregator,
            dispatcher,
        })
    }

    pub fn config(&self) -> &ConsolidatorConfig {
        &self.config
    }

    pub fn aggregator(&self) -> &Arc<Aggregator> {
        &self.aggregator
    }

    /// Run against the configured input file
    pub fn run_file(self) -> Result<PipelineOutcome> {
        let path = self.config.input_path.clone();
        let file = File::open(&path).inspect_err(|e| {
            error!(path = %path.display(), error = %e, "Failed to open input file");
        })?;

        info!(path = %path.display(), "Reading records");
        self.run(BufReader::new(file))
    }

    /// Feed every candidate line of `reader`, then drain and report
    pub fn run<R: BufRead>(self, reader: R) -> Result<PipelineOutcome> {
        let mut records = RecordReader::new(reader);
        let fed = self.feed(&mut records);
        let stopped = self.dispatcher.stop();

        let summary = match (fed, stopped) {
            (Ok(()), Ok(summary)) => summary,
            // The worker's own error explains why scheduling was refused
            (Err(ConsolidatorError::Aborted), Err(worker_error)) => return Err(worker_error),
            (Err(err), _) | (Ok(()), Err(err)) => return Err(err),
        };

        let report = self.aggregator.report();
        info!(
            lines = records.lines_read(),
            records = report.total_records,
            debtors = report.debtor_count(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Consolidation finished"
        );

        Ok(PipelineOutcome { summary, report })
    }

    fn feed<R: BufRead>(&self, records: &mut RecordReader<R>) -> Result<()> {
        while let Some(line) = records.next_line()? {
            if is_candidate(line) {
                self.dispatcher.schedule(line)?;
            }
        }
        Ok(())
    }
}
