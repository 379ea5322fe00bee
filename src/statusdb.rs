use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ReportError;
use crate::record::ProjectRecord;
use crate::store::{Database, StoreClient, StoreConnection};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusDbSettings {
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// CouchDB-backed StatusDB. Requests are made once; there is no retry.
#[derive(Clone)]
pub struct StatusDbClient {
    client: Client,
    settings: StatusDbSettings,
}

impl StatusDbClient {
    pub fn new(settings: StatusDbSettings) -> Result<Self, ReportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("ngi-reports/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| ReportError::StoreHttp(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| ReportError::StoreHttp(err.to_string()))?;
        Ok(Self { client, settings })
    }

    fn base_url(&self) -> &str {
        self.settings.url.trim_end_matches('/')
    }
}

impl StoreClient for StatusDbClient {
    type Connection = StatusDbConnection;

    fn connect(&self, database: Database) -> Result<StatusDbConnection, ReportError> {
        let connection = StatusDbConnection {
            client: self.client.clone(),
            settings: self.settings.clone(),
            database,
            db_url: format!("{}/{}", self.base_url(), database.name()),
        };
        let connection_error = |message: String| ReportError::StoreConnection {
            database: database.to_string(),
            message,
        };
        let response = connection
            .get(&connection.db_url)
            .send()
            .map_err(|err| connection_error(err.to_string()))?;
        if !response.status().is_success() {
            return Err(connection_error(format!("status {}", response.status().as_u16())));
        }
        tracing::debug!(database = %database, "connected to StatusDB");
        Ok(connection)
    }
}

pub struct StatusDbConnection {
    client: Client,
    settings: StatusDbSettings,
    database: Database,
    db_url: String,
}

#[derive(Debug, Deserialize)]
struct ViewResponse {
    #[serde(default)]
    rows: Vec<ViewRow>,
}

#[derive(Debug, Deserialize)]
struct ViewRow {
    id: String,
}

impl StatusDbConnection {
    fn get(&self, url: &str) -> RequestBuilder {
        let request = self.client.get(url);
        match &self.settings.username {
            Some(username) => request.basic_auth(username, self.settings.password.as_ref()),
            None => request,
        }
    }

    fn lookup_id(&self, name: &str) -> Result<Option<String>, ReportError> {
        let (design, view) = self
            .database
            .name_view()
            .split_once('/')
            .unwrap_or(("names", "name"));
        let url = format!("{}/_design/{design}/_view/{view}", self.db_url);
        let key = serde_json::to_string(name).map_err(|err| ReportError::StoreHttp(err.to_string()))?;
        let response = self
            .get(&url)
            .query(&[("key", key.as_str())])
            .send()
            .map_err(|err| ReportError::StoreHttp(err.to_string()))?;
        let view: ViewResponse = handle_status(response)?
            .json()
            .map_err(|err| ReportError::StoreHttp(err.to_string()))?;
        Ok(view.rows.into_iter().next().map(|row| row.id))
    }
}

impl StoreConnection for StatusDbConnection {
    fn database(&self) -> Database {
        self.database
    }

    fn get_entry(&self, name: &str) -> Result<Option<ProjectRecord>, ReportError> {
        let Some(doc_id) = self.lookup_id(name)? else {
            return Ok(None);
        };
        let response = self
            .get(&format!("{}/{doc_id}", self.db_url))
            .send()
            .map_err(|err| ReportError::StoreHttp(err.to_string()))?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let document: Value = handle_status(response)?
            .json()
            .map_err(|err| ReportError::InvalidRecord {
                name: name.to_string(),
                message: err.to_string(),
            })?;
        ProjectRecord::from_value(name, document).map(Some)
    }
}

fn handle_status(response: Response) -> Result<Response, ReportError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status().as_u16();
    let message = response
        .text()
        .unwrap_or_else(|_| "StatusDB request failed".to_string());
    Err(ReportError::StoreStatus { status, message })
}
