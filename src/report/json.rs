use anyhow::{Context, Result};

use crate::core::AuditReport;

pub fn to_json(report: &AuditReport) -> Result<Vec<u8>> {
    let mut buf = serde_json::to_vec_pretty(report).context("failed to serialize report")?;
    buf.push(b'\n');
    Ok(buf)
}

pub fn from_json(bytes: &[u8]) -> Result<AuditReport> {
    serde_json::from_slice(bytes).context("failed to parse report JSON")
}
