use crate::domain::{
    DataSource, ProjectInfo, ProjectStatus, ProjectSummary, ReportContext, ReportOverrides,
    uppmax_path,
};
use crate::error::ReportError;
use crate::fields::{order_dates, ordered_reads};
use crate::record::ProjectRecord;
use crate::reference::Reference;
use crate::store::{Database, StoreClient, StoreConnection};

/// Picks the project to report on; an explicit name beats the context default.
pub fn resolve_project_name(
    explicit: Option<&str>,
    context_default: Option<&str>,
) -> Result<String, ReportError> {
    explicit
        .into_iter()
        .chain(context_default)
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or(ReportError::Configuration)
}

pub struct ReportBuilder<C: StoreClient> {
    client: C,
}

impl<C: StoreClient> ReportBuilder<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn build(
        &self,
        context: &ReportContext,
        overrides: &ReportOverrides,
    ) -> Result<ProjectSummary, ReportError> {
        let info = self.build_project_info(context, overrides)?;
        Ok(ProjectSummary::new(info, context.creation_date.clone()))
    }

    pub fn build_project_info(
        &self,
        context: &ReportContext,
        overrides: &ReportOverrides,
    ) -> Result<ProjectInfo, ReportError> {
        let ngi_name = resolve_project_name(
            overrides.project.as_deref(),
            context.default_project.as_deref(),
        )
        .inspect_err(|err| tracing::error!("{err}"))?;

        // Flowcell and sample metrics are not read here, but all three
        // databases must be reachable before anything is fetched.
        let projects = self.connect(Database::Projects, &ngi_name)?;
        let _flowcells = self.connect(Database::Flowcells, &ngi_name)?;
        let _samples = self.connect(Database::Samples, &ngi_name)?;

        let record = projects
            .get_entry(&ngi_name)
            .map_err(|err| logged(&ngi_name, err))?
            .ok_or_else(|| logged(&ngi_name, ReportError::ProjectNotFound(ngi_name.clone())))?;
        validate_source(&ngi_name, &record).map_err(|err| logged(&ngi_name, err))?;

        tracing::info!(project = %ngi_name, "building project summary");
        Ok(project_info(
            ngi_name,
            &record,
            &context.creation_date,
            overrides.uppmax_id.as_deref(),
        ))
    }

    fn connect(&self, database: Database, project: &str) -> Result<C::Connection, ReportError> {
        self.client
            .connect(database)
            .map_err(|err| logged(project, err))
    }
}

/// Older projects were not registered through the LIMS and use a different schema.
pub fn validate_source(project: &str, record: &ProjectRecord) -> Result<DataSource, ReportError> {
    record
        .text(&["source"])
        .unwrap_or_default()
        .parse()
        .map_err(|found: String| ReportError::UnsupportedSource {
            project: project.to_string(),
            found: if found.is_empty() {
                "<missing>".to_string()
            } else {
                found
            },
        })
}

/// Fills every report field from a validated record.
pub fn project_info(
    ngi_name: String,
    record: &ProjectRecord,
    creation_date: &str,
    uppmax_override: Option<&str>,
) -> ProjectInfo {
    let uppmax_id = uppmax_override
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .or_else(|| record.text(&["uppnex_id"]));
    let uppmax_path = uppmax_id.as_deref().map(|id| uppmax_path(id, &ngi_name));
    let best_practice = record
        .get(&["details", "best_practice_bioinformatics"])
        .is_some_and(|value| *value != "No");
    let sequenced = record.is_present(&["project_summary", "all_samples_sequenced"]);

    ProjectInfo {
        ngi_id: record.text(&["project_id"]),
        contact: record.text(&["contact"]),
        dates: order_dates(record, Some(creation_date)),
        application: record.text(&["application"]),
        num_samples: record.get(&["no_of_samples"]).cloned(),
        reference: Reference::resolve(record.text(&["reference_genome"]).as_deref()),
        user_id: record.text(&["details", "customer_project_reference"]),
        num_lanes: record
            .get(&["details", "sequence_units_ordered_(lanes)"])
            .cloned(),
        uppmax_id,
        uppmax_path,
        ordered_reads: ordered_reads(record),
        best_practice,
        status: ProjectStatus::from_sequenced(sequenced),
        ngi_name,
    }
}

fn logged(project: &str, err: ReportError) -> ReportError {
    tracing::error!(project, error = %err, "project summary failed");
    err
}
