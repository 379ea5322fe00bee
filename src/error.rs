use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ReportError {
    #[error("no project name found - please specify using '--project'")]
    Configuration,

    #[error("invalid project name '{0}'")]
    InvalidProjectName(String),

    #[error("no such project '{0}'")]
    ProjectNotFound(String),

    #[error("the source for data for project {project} is not LIMS (found: {found})")]
    UnsupportedSource { project: String, found: String },

    #[error("could not connect to {database} database in StatusDB: {message}")]
    StoreConnection { database: String, message: String },

    #[error("StatusDB request failed: {0}")]
    StoreHttp(String),

    #[error("StatusDB returned status {status}: {message}")]
    StoreStatus { status: u16, message: String },

    #[error("invalid document for '{name}': {message}")]
    InvalidRecord { name: String, message: String },

    #[error("missing config file ngi_reports.json")]
    MissingConfig,

    #[error("failed to read config file at {0}")]
    ConfigRead(PathBuf),

    #[error("failed to parse JSON config: {0}")]
    ConfigParse(String),

    #[error("filesystem error: {0}")]
    Filesystem(String),
}
