#![allow(dead_code)] // Each test binary uses a different subset of helpers

pub mod strategies;

use debt_consolidator::{ConsolidatorConfig, Pipeline, PipelineOutcome, Result};
use serde_json::json;
use std::io::Cursor;

/// One input line in the record format
pub fn record_line(company: &str, debt: i64, phones: &[&str]) -> String {
    json!({ "company": company, "debt": debt, "phones": phones }).to_string()
}

/// Run the full pipeline over in-memory lines
pub fn run_lines(lines: &[String], worker_count: usize) -> Result<PipelineOutcome> {
    let config = ConsolidatorConfig::default().with_worker_count(worker_count);
    let input = lines.join("\n");
    Pipeline::new(config)?.run(Cursor::new(input))
}
