//! Answer Repository implementation over a CouchDB-compatible database

use crate::config::FileStoreConfig;
use crate::couch::error::{CouchError, Result};
use crate::couch::protocol::{
    AnswerListResponse, BULK_DOCS, BulkDocsRequest, DESIGN, ErrorBody, VIEW, is_document_id,
};
use crate::http::{BasicAuth, build_client, join_segments, split_credentials};
use async_trait::async_trait;
use qa_application::{AnswerRepository, BulkResult, DatabaseStatus, StoreError};
use qa_domain::{APP_SETTINGS_ID, AnswerDocument, AppSettings, DesignDocument};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Answer store backed by one database of a CouchDB/Cloudant server
pub struct CouchAnswerRepository {
    client: reqwest::Client,
    base_url: Url,
    database: String,
    auth: Option<BasicAuth>,
}

impl CouchAnswerRepository {
    /// Create a repository for `database` on the server at `url`.
    ///
    /// Credentials embedded in the URL are used unless `auth` is given.
    pub fn new(
        url: &str,
        database: impl Into<String>,
        auth: Option<BasicAuth>,
        timeout: Duration,
    ) -> Result<Self> {
        let (base_url, embedded) = split_credentials(url).map_err(CouchError::InvalidUrl)?;
        let client = build_client(timeout)?;
        let database = database.into();

        info!("Answer repository initialized for {}{}", base_url, database);

        Ok(Self {
            client,
            base_url,
            database,
            auth: auth.or(embedded),
        })
    }

    pub fn from_config(config: &FileStoreConfig) -> Result<Self> {
        Self::new(
            &config.url,
            config.database.clone(),
            BasicAuth::from_parts(config.username.as_deref(), config.password.as_deref()),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// URL of `/{db}/{segments...}`
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut path = vec![self.database.as_str()];
        path.extend_from_slice(segments);
        join_segments(&self.base_url, &path)
            .ok_or_else(|| CouchError::InvalidUrl(self.base_url.to_string()))
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        debug!("{} {}", method, url);
        let request = self.client.request(method, url);
        match &self.auth {
            Some(auth) => auth.apply(request),
            None => request,
        }
    }

    /// Send the request and decode a success body, or turn the error body
    /// into [`CouchError::Api`].
    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::api_error(status, response).await);
        }

        Ok(response.json().await?)
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> CouchError {
        let body = response.text().await.unwrap_or_default();
        let parsed = ErrorBody::parse(&body);
        CouchError::Api {
            status: status.as_u16(),
            error: parsed.error.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown")
                    .to_lowercase()
                    .replace(' ', "_")
            }),
            reason: parsed.reason,
        }
    }

    async fn database_exists(&self) -> Result<bool> {
        let url = self.endpoint(&[])?;
        let response = self.request(Method::GET, url).send().await?;
        match response.status() {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            s => Err(Self::api_error(s, response).await),
        }
    }

    async fn create_database(&self) -> Result<DatabaseStatus> {
        let url = self.endpoint(&[])?;
        let response = self.request(Method::PUT, url).send().await?;
        match response.status() {
            s if s.is_success() => Ok(DatabaseStatus::Created),
            // Created concurrently by someone else
            StatusCode::PRECONDITION_FAILED => Ok(DatabaseStatus::AlreadyExists),
            s => Err(Self::api_error(s, response).await),
        }
    }
}

#[async_trait]
impl AnswerRepository for CouchAnswerRepository {
    async fn get_answer(&self, class_name: &str) -> std::result::Result<AnswerDocument, StoreError> {
        if !is_document_id(class_name) {
            debug!("{:?} is not a document id", class_name);
            return Err(StoreError::NotFound("missing".to_string()));
        }

        let url = self.endpoint(&[class_name])?;
        Ok(self.send_json(self.request(Method::GET, url)).await?)
    }

    async fn get_app_settings(&self) -> std::result::Result<AppSettings, StoreError> {
        let url = self.endpoint(&[APP_SETTINGS_ID])?;
        Ok(self.send_json(self.request(Method::GET, url)).await?)
    }

    async fn ensure_database(&self) -> std::result::Result<DatabaseStatus, StoreError> {
        if self.database_exists().await? {
            info!("Database {} already exists", self.database);
            return Ok(DatabaseStatus::AlreadyExists);
        }

        let status = self.create_database().await?;
        info!("Database {} created", self.database);
        Ok(status)
    }

    async fn put_design_document(
        &self,
        design: &DesignDocument,
    ) -> std::result::Result<(), StoreError> {
        let url = self.endpoint(&[DESIGN, DesignDocument::NAME])?;
        let _: serde_json::Value = self
            .send_json(self.request(Method::PUT, url).json(design))
            .await?;
        Ok(())
    }

    async fn bulk_insert(
        &self,
        docs: Vec<serde_json::Value>,
    ) -> std::result::Result<Vec<BulkResult>, StoreError> {
        let url = self.endpoint(&[BULK_DOCS])?;
        let body = BulkDocsRequest { docs };
        Ok(self
            .send_json(self.request(Method::POST, url).json(&body))
            .await?)
    }

    async fn list_answers(&self) -> std::result::Result<Vec<AnswerDocument>, StoreError> {
        let url = self.endpoint(&[
            DESIGN,
            DesignDocument::NAME,
            VIEW,
            DesignDocument::LIST_VIEW,
        ])?;
        let response: AnswerListResponse = self.send_json(self.request(Method::GET, url)).await?;
        Ok(response.rows.into_iter().map(|row| row.value).collect())
    }
}
