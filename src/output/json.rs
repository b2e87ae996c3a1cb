//! JSON export and import of plan reports.

use crate::error::{PlannerError, PlannerResult};
use crate::models::PlanReport;
use std::path::Path;

/// Serialize a report as pretty-printed JSON.
pub fn to_json(report: &PlanReport) -> PlannerResult<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| PlannerError::Export(format!("Error serializing JSON: {e}")))
}

/// Parse a report, naming the JSON path of the first bad field on error.
pub fn parse_json(input: &str) -> PlannerResult<PlanReport> {
    let mut deserializer = serde_json::Deserializer::from_str(input);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        PlannerError::Export(format!(
            "Error parsing JSON report: path={} error={}",
            e.path(),
            e.inner()
        ))
    })
}

/// Write a report as JSON to `path`.
pub fn write_json(path: &Path, report: &PlanReport) -> PlannerResult<()> {
    let json = to_json(report)?;
    std::fs::write(path, json)
        .map_err(|e| PlannerError::Export(format!("Error writing {}: {e}", path.display())))?;
    log::info!(
        "Wrote plan for {} with {} subnets to {}",
        report.plan.network,
        report.subnets.len(),
        path.display()
    );
    Ok(())
}

/// Read a JSON report from `path`.
pub fn read_json(path: &Path) -> PlannerResult<PlanReport> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| PlannerError::Export(format!("Error reading {}: {e}", path.display())))?;
    parse_json(&text)
}
