use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::reference::Reference;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Lims,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Lims => write!(f, "lims"),
        }
    }
}

impl FromStr for DataSource {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "lims" => Ok(DataSource::Lims),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectStatus {
    #[serde(rename = "Sequencing done")]
    SequencingDone,
    #[serde(rename = "Sequencing ongoing")]
    SequencingOngoing,
}

impl ProjectStatus {
    pub fn from_sequenced(all_samples_sequenced: bool) -> Self {
        if all_samples_sequenced {
            ProjectStatus::SequencingDone
        } else {
            ProjectStatus::SequencingOngoing
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectStatus::SequencingDone => write!(f, "Sequencing done"),
            ProjectStatus::SequencingOngoing => write!(f, "Sequencing ongoing"),
        }
    }
}

/// Report-ready project fields. Every key is always serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectInfo {
    pub ngi_name: String,
    pub ngi_id: Option<String>,
    pub contact: Option<String>,
    pub dates: String,
    pub application: Option<String>,
    pub num_samples: Option<Value>,
    pub reference: Reference,
    #[serde(rename = "user_ID")]
    pub user_id: Option<String>,
    pub num_lanes: Option<Value>,
    #[serde(rename = "UPPMAX_id")]
    pub uppmax_id: Option<String>,
    #[serde(rename = "UPPMAX_path")]
    pub uppmax_path: Option<String>,
    pub ordered_reads: String,
    pub best_practice: bool,
    pub status: ProjectStatus,
}

/// Delivery inbox for a project on UPPMAX.
pub fn uppmax_path(uppmax_id: &str, ngi_name: &str) -> String {
    format!("/proj/{uppmax_id}/INBOX/{ngi_name}")
}

pub fn report_filename(ngi_name: &str) -> String {
    format!("{ngi_name}_project_summary")
}

/// What gets handed to rendering: the model plus the report's base name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub report_fn: String,
    pub creation_date: String,
    pub project_info: ProjectInfo,
}

impl ProjectSummary {
    pub fn new(project_info: ProjectInfo, creation_date: String) -> Self {
        Self {
            report_fn: report_filename(&project_info.ngi_name),
            creation_date,
            project_info,
        }
    }
}

/// Values shared by every report of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportContext {
    pub creation_date: String,
    pub default_project: Option<String>,
}

impl ReportContext {
    pub fn new(creation_date: impl Into<String>) -> Self {
        Self {
            creation_date: creation_date.into(),
            default_project: None,
        }
    }

    pub fn with_default_project(mut self, project: Option<String>) -> Self {
        self.default_project = project;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOverrides {
    pub project: Option<String>,
    pub uppmax_id: Option<String>,
}
