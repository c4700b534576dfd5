//! Classifier Gateway implementation over the classifier REST API

use crate::config::FileClassifierConfig;
use crate::http::{BasicAuth, build_client, join_segments, split_credentials};
use crate::nlc::error::{NlcError, Result};
use crate::nlc::protocol::{
    API_VERSION, CLASSIFIERS, CLASSIFY, ClassifyRequest, ErrorBody, ListClassifiersResponse,
    TrainingMetadata,
};
use async_trait::async_trait;
use qa_application::{ClassifierGateway, CreateClassifierRequest, GatewayError};
use qa_domain::{Classification, Classifier, ClassifierId, ClassifierSummary};
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

/// Classifier Gateway backed by the hosted classifier service
pub struct NlcClassifierGateway {
    client: reqwest::Client,
    base_url: Url,
    auth: Option<BasicAuth>,
}

impl NlcClassifierGateway {
    /// Create a gateway for the service at `url`.
    ///
    /// Credentials embedded in the URL are used unless `auth` is given.
    pub fn new(url: &str, auth: Option<BasicAuth>, timeout: Duration) -> Result<Self> {
        let (base_url, embedded) = split_credentials(url).map_err(NlcError::InvalidUrl)?;
        let client = build_client(timeout)?;

        info!("Classifier gateway initialized for {}", base_url);

        Ok(Self {
            client,
            base_url,
            auth: auth.or(embedded),
        })
    }

    pub fn from_config(config: &FileClassifierConfig) -> Result<Self> {
        Self::new(
            &config.url,
            BasicAuth::from_parts(config.username.as_deref(), config.password.as_deref()),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut path = vec![API_VERSION, CLASSIFIERS];
        path.extend_from_slice(segments);
        join_segments(&self.base_url, &path)
            .ok_or_else(|| NlcError::InvalidUrl(self.base_url.to_string()))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            Some(auth) => auth.apply(request),
            None => request,
        }
    }

    /// Send the request and decode a success body, or turn the error body
    /// into [`NlcError::Api`].
    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T> {
        let response = self.authorize(request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed = ErrorBody::parse(&body);
            return Err(NlcError::Api {
                status: parsed.code.unwrap_or(status.as_u16()),
                error: parsed
                    .error
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string()),
                description: parsed.description,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl ClassifierGateway for NlcClassifierGateway {
    async fn list_classifiers(&self) -> std::result::Result<Vec<ClassifierSummary>, GatewayError> {
        let url = self.endpoint(&[])?;
        debug!("GET {}", url);

        let response: ListClassifiersResponse = self.send_json(self.client.get(url)).await?;
        Ok(response.classifiers)
    }

    async fn get_classifier(
        &self,
        classifier_id: &str,
    ) -> std::result::Result<Classifier, GatewayError> {
        let url = self.endpoint(&[classifier_id])?;
        debug!("GET {}", url);

        Ok(self.send_json(self.client.get(url)).await?)
    }

    async fn classify(
        &self,
        classifier_id: &ClassifierId,
        text: &str,
    ) -> std::result::Result<Classification, GatewayError> {
        let url = self.endpoint(&[classifier_id.as_str(), CLASSIFY])?;
        debug!("POST {}", url);

        let request = self.client.post(url).json(&ClassifyRequest { text });
        Ok(self.send_json(request).await?)
    }

    async fn create_classifier(
        &self,
        request: CreateClassifierRequest,
    ) -> std::result::Result<Classifier, GatewayError> {
        let url = self.endpoint(&[])?;
        debug!("POST {} ({} bytes of training data)", url, request.training_data.len());

        let metadata = serde_json::to_string(&TrainingMetadata {
            language: &request.language,
            name: &request.name,
        })
        .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        let training_data = Part::bytes(request.training_data)
            .file_name("training_data.csv")
            .mime_str("text/csv")
            .map_err(NlcError::from)?;

        let form = Form::new()
            .part(
                "training_metadata",
                Part::text(metadata)
                    .mime_str("application/json")
                    .map_err(NlcError::from)?,
            )
            .part("training_data", training_data);

        Ok(self.send_json(self.client.post(url).multipart(form)).await?)
    }
}
