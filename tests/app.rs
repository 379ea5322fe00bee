use std::collections::HashMap;
use std::sync::Mutex;

use assert_matches::assert_matches;
use serde_json::{Value, json};

use ngi_reports::app::ReportBuilder;
use ngi_reports::domain::{ProjectStatus, ReportContext, ReportOverrides};
use ngi_reports::error::ReportError;
use ngi_reports::record::ProjectRecord;
use ngi_reports::store::{Database, StoreClient, StoreConnection};

#[derive(Default)]
struct MockStore {
    projects: HashMap<String, Value>,
    offline: Option<Database>,
    connects: Mutex<Vec<Database>>,
}

impl MockStore {
    fn with_project(name: &str, document: Value) -> Self {
        let mut store = MockStore::default();
        store.projects.insert(name.to_string(), document);
        store
    }
}

struct MockConnection {
    database: Database,
    documents: HashMap<String, Value>,
}

impl StoreClient for &MockStore {
    type Connection = MockConnection;

    fn connect(&self, database: Database) -> Result<MockConnection, ReportError> {
        self.connects.lock().unwrap().push(database);
        if self.offline == Some(database) {
            return Err(ReportError::StoreConnection {
                database: database.to_string(),
                message: "offline".to_string(),
            });
        }
        let documents = match database {
            Database::Projects => self.projects.clone(),
            _ => HashMap::new(),
        };
        Ok(MockConnection {
            database,
            documents,
        })
    }
}

impl StoreConnection for MockConnection {
    fn database(&self) -> Database {
        self.database
    }

    fn get_entry(&self, name: &str) -> Result<Option<ProjectRecord>, ReportError> {
        self.documents
            .get(name)
            .cloned()
            .map(|value| ProjectRecord::from_value(name, value))
            .transpose()
    }
}

fn lims_project() -> Value {
    json!({
        "project_id": "P1234",
        "contact": "someone@example.com",
        "application": "WG re-seq",
        "no_of_samples": 3,
        "reference_genome": "hg19",
        "uppnex_id": "b2013064",
        "source": "lims",
        "details": {
            "customer_project_reference": "ABC-1",
            "sequence_units_ordered_(lanes)": 2,
            "order_received": "2020-01-01",
            "queue_date": "2020-01-05",
            "best_practice_bioinformatics": "Yes"
        },
        "samples": {
            "P1234_101": {"details": {"reads_min": 30}},
            "P1234_102": {"details": {"reads_min": 30}},
            "P1234_103": {}
        },
        "project_summary": {}
    })
}

fn request(project: Option<&str>) -> (ReportContext, ReportOverrides) {
    let context = ReportContext::new("2020-02-01");
    let overrides = ReportOverrides {
        project: project.map(str::to_string),
        uppmax_id: None,
    };
    (context, overrides)
}

#[test]
fn builds_full_project_info() {
    let store = MockStore::with_project("A.Test_20_01", lims_project());
    let (context, overrides) = request(Some("A.Test_20_01"));

    let summary = ReportBuilder::new(&store).build(&context, &overrides).unwrap();
    let info = &summary.project_info;

    assert_eq!(summary.report_fn, "A.Test_20_01_project_summary");
    assert_eq!(info.ngi_name, "A.Test_20_01");
    assert_eq!(info.ngi_id.as_deref(), Some("P1234"));
    assert_eq!(info.num_samples, Some(json!(3)));
    assert_eq!(info.num_lanes, Some(json!(2)));
    assert_eq!(info.user_id.as_deref(), Some("ABC-1"));
    assert_eq!(info.reference.genome.as_deref(), Some("hg19"));
    assert_eq!(info.reference.organism.as_deref(), Some("Human"));
    assert_eq!(info.uppmax_path.as_deref(), Some("/proj/b2013064/INBOX/A.Test_20_01"));
    assert_eq!(info.ordered_reads, "30M");
    assert_eq!(
        info.dates,
        "_Order received:_ 2020-01-01, _Queue date:_ 2020-01-05, _Report date:_ 2020-02-01"
    );
    assert!(info.best_practice);
    assert_eq!(info.status, ProjectStatus::SequencingOngoing);
    assert_eq!(
        *store.connects.lock().unwrap(),
        vec![Database::Projects, Database::Flowcells, Database::Samples]
    );
}

#[test]
fn context_default_used_without_explicit_name() {
    let store = MockStore::with_project("A.Test_20_01", lims_project());
    let (context, overrides) = request(None);
    let context = context.with_default_project(Some("A.Test_20_01".to_string()));

    let info = ReportBuilder::new(&store)
        .build_project_info(&context, &overrides)
        .unwrap();
    assert_eq!(info.ngi_name, "A.Test_20_01");
}

#[test]
fn missing_name_fails_before_store_access() {
    let store = MockStore::with_project("A.Test_20_01", lims_project());
    let (context, overrides) = request(None);

    let err = ReportBuilder::new(&store)
        .build_project_info(&context, &overrides)
        .unwrap_err();
    assert_matches!(err, ReportError::Configuration);
    assert!(store.connects.lock().unwrap().is_empty());
}

#[test]
fn unknown_project_is_not_found() {
    let store = MockStore::with_project("A.Test_20_01", lims_project());
    let (context, overrides) = request(Some("B.Missing_21_01"));

    let err = ReportBuilder::new(&store)
        .build_project_info(&context, &overrides)
        .unwrap_err();
    assert_matches!(err, ReportError::ProjectNotFound(name) if name == "B.Missing_21_01");
}

#[test]
fn non_lims_source_is_rejected() {
    let mut legacy = lims_project();
    legacy["source"] = json!("google_docs");
    let store = MockStore::with_project("A.Test_20_01", legacy);
    let (context, overrides) = request(Some("A.Test_20_01"));

    let err = ReportBuilder::new(&store)
        .build_project_info(&context, &overrides)
        .unwrap_err();
    assert_matches!(err, ReportError::UnsupportedSource { project, .. } if project == "A.Test_20_01");
}

#[test]
fn missing_source_is_rejected() {
    let mut legacy = lims_project();
    legacy.as_object_mut().unwrap().remove("source");
    let store = MockStore::with_project("A.Test_20_01", legacy);
    let (context, overrides) = request(Some("A.Test_20_01"));

    let err = ReportBuilder::new(&store)
        .build_project_info(&context, &overrides)
        .unwrap_err();
    assert_matches!(err, ReportError::UnsupportedSource { .. });
}

#[test]
fn unavailable_database_aborts_before_fetch() {
    let mut store = MockStore::with_project("A.Test_20_01", lims_project());
    store.offline = Some(Database::Flowcells);
    let (context, overrides) = request(Some("A.Test_20_01"));

    let err = ReportBuilder::new(&store)
        .build_project_info(&context, &overrides)
        .unwrap_err();
    assert_matches!(err, ReportError::StoreConnection { database, .. } if database == "flowcells");
    assert_eq!(
        *store.connects.lock().unwrap(),
        vec![Database::Projects, Database::Flowcells]
    );
}

#[test]
fn sequenced_project_reports_delivery_and_status() {
    let mut project = lims_project();
    project["project_summary"] = json!({"all_samples_sequenced": "2020-03-01"});
    project["reference_genome"] = json!("other");
    project["details"]["best_practice_bioinformatics"] = json!("No");
    let store = MockStore::with_project("A.Test_20_01", project);
    let (context, mut overrides) = request(Some("A.Test_20_01"));
    overrides.uppmax_id = Some("a2014205".to_string());

    let info = ReportBuilder::new(&store)
        .build_project_info(&context, &overrides)
        .unwrap();
    assert_eq!(info.status, ProjectStatus::SequencingDone);
    assert!(info.dates.contains("_All data delivered:_ 2020-03-01"));
    assert_eq!(info.reference.genome, None);
    assert_eq!(info.reference.organism, None);
    assert!(!info.best_practice);
    assert_eq!(info.uppmax_id.as_deref(), Some("a2014205"));
}
