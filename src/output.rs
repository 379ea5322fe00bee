use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::domain::ProjectSummary;
use crate::error::ReportError;

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_summary(summary: &ProjectSummary) -> io::Result<()> {
        Self::print_json(summary)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

/// Writes `<dir>/<report_fn>.json`, replacing any previous file atomically.
pub fn write_summary(dir: &Utf8Path, summary: &ProjectSummary) -> Result<Utf8PathBuf, ReportError> {
    std::fs::create_dir_all(dir.as_std_path())
        .map_err(|err| ReportError::Filesystem(err.to_string()))?;
    let dest = dir.join(format!("{}.json", summary.report_fn));
    let content = serde_json::to_vec_pretty(summary)
        .map_err(|err| ReportError::Filesystem(err.to_string()))?;
    let mut temp = tempfile::Builder::new()
        .prefix("ngi-reports")
        .tempfile_in(dir.as_std_path())
        .map_err(|err| ReportError::Filesystem(err.to_string()))?;
    temp.write_all(&content)
        .map_err(|err| ReportError::Filesystem(err.to_string()))?;
    temp.persist(dest.as_std_path())
        .map_err(|err| ReportError::Filesystem(err.to_string()))?;
    Ok(dest)
}
