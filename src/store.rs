use std::fmt;
use std::fs;
use std::io;

use camino::Utf8PathBuf;

use crate::error::ReportError;
use crate::record::ProjectRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Database {
    Projects,
    Flowcells,
    Samples,
}

impl Database {
    pub const ALL: [Database; 3] = [Database::Projects, Database::Flowcells, Database::Samples];

    pub fn name(&self) -> &'static str {
        match self {
            Database::Projects => "projects",
            Database::Flowcells => "flowcells",
            Database::Samples => "samples",
        }
    }

    /// CouchDB view mapping document names to ids.
    pub fn name_view(&self) -> &'static str {
        match self {
            Database::Projects => "project/project_name",
            Database::Flowcells | Database::Samples => "names/name",
        }
    }
}

impl fmt::Display for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

pub trait StoreConnection {
    fn database(&self) -> Database;
    fn get_entry(&self, name: &str) -> Result<Option<ProjectRecord>, ReportError>;
}

pub trait StoreClient {
    type Connection: StoreConnection;

    fn connect(&self, database: Database) -> Result<Self::Connection, ReportError>;
}

/// Documents exported to disk as `<root>/<database>/<name>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: Utf8PathBuf,
}

impl DirectoryStore {
    pub fn new(root: Utf8PathBuf) -> Self {
        Self { root }
    }

    pub fn database_dir(&self, database: Database) -> Utf8PathBuf {
        self.root.join(database.name())
    }
}

impl StoreClient for DirectoryStore {
    type Connection = DirectoryConnection;

    fn connect(&self, database: Database) -> Result<DirectoryConnection, ReportError> {
        let dir = self.database_dir(database);
        if !dir.as_std_path().is_dir() {
            return Err(ReportError::StoreConnection {
                database: database.to_string(),
                message: format!("{dir} is not a directory"),
            });
        }
        Ok(DirectoryConnection { database, dir })
    }
}

#[derive(Debug, Clone)]
pub struct DirectoryConnection {
    database: Database,
    dir: Utf8PathBuf,
}

impl DirectoryConnection {
    pub fn document_path(&self, name: &str) -> Utf8PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl StoreConnection for DirectoryConnection {
    fn database(&self) -> Database {
        self.database
    }

    fn get_entry(&self, name: &str) -> Result<Option<ProjectRecord>, ReportError> {
        if name.contains(['/', '\\']) || name.contains("..") {
            return Err(ReportError::InvalidProjectName(name.to_string()));
        }
        let path = self.document_path(name);
        let content = match fs::read_to_string(path.as_std_path()) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(ReportError::Filesystem(format!("read {path}: {err}"))),
        };
        let value = serde_json::from_str(&content).map_err(|err| ReportError::InvalidRecord {
            name: name.to_string(),
            message: err.to_string(),
        })?;
        ProjectRecord::from_value(name, value).map(Some)
    }
}
