//! In-memory port implementations shared by use case tests.

use crate::ports::answer_repository::{AnswerRepository, BulkResult, DatabaseStatus, StoreError};
use crate::ports::classifier_gateway::{ClassifierGateway, CreateClassifierRequest, GatewayError};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use qa_domain::{
    AnswerDocument, AppSettings, ClassScore, Classification, Classifier, ClassifierId,
    ClassifierStatus, ClassifierSummary, DesignDocument,
};
use std::collections::HashMap;
use std::sync::Mutex;

pub(crate) fn summary(id: &str, created_secs: i64) -> ClassifierSummary {
    ClassifierSummary {
        classifier_id: id.to_string(),
        created: Utc.timestamp_opt(created_secs, 0).unwrap(),
        name: None,
        language: None,
        url: None,
    }
}

/// Scripted classifier service; records every call it receives.
pub(crate) struct MockGateway {
    listing: Result<Vec<ClassifierSummary>, GatewayError>,
    statuses: HashMap<String, Result<ClassifierStatus, GatewayError>>,
    classes: Result<Vec<ClassScore>, GatewayError>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl MockGateway {
    pub(crate) fn new() -> Self {
        Self {
            listing: Ok(Vec::new()),
            statuses: HashMap::new(),
            classes: Ok(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a classifier to the listing with the given status.
    pub(crate) fn with_classifier(
        mut self,
        id: &str,
        created_secs: i64,
        status: ClassifierStatus,
    ) -> Self {
        if let Ok(listing) = &mut self.listing {
            listing.push(summary(id, created_secs));
        }
        self.statuses.insert(id.to_string(), Ok(status));
        self
    }

    /// Add a classifier whose status lookup fails.
    pub(crate) fn with_broken_classifier(mut self, id: &str, created_secs: i64) -> Self {
        if let Ok(listing) = &mut self.listing {
            listing.push(summary(id, created_secs));
        }
        self.statuses.insert(
            id.to_string(),
            Err(GatewayError::Http {
                status: 500,
                error: "Internal Server Error".to_string(),
                description: None,
            }),
        );
        self
    }

    pub(crate) fn with_listing_error(mut self, error: GatewayError) -> Self {
        self.listing = Err(error);
        self
    }

    pub(crate) fn with_classes(mut self, classes: Vec<(&str, f64)>) -> Self {
        self.classes = Ok(classes
            .into_iter()
            .map(|(name, confidence)| ClassScore::new(name, confidence))
            .collect());
        self
    }

    pub(crate) fn with_classify_error(mut self, error: GatewayError) -> Self {
        self.classes = Err(error);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ClassifierGateway for MockGateway {
    async fn list_classifiers(&self) -> Result<Vec<ClassifierSummary>, GatewayError> {
        self.record("list".to_string());
        self.listing.clone()
    }

    async fn get_classifier(&self, classifier_id: &str) -> Result<Classifier, GatewayError> {
        self.record(format!("get:{}", classifier_id));
        let created = match &self.listing {
            Ok(listing) => listing
                .iter()
                .find(|s| s.classifier_id == classifier_id)
                .map(|s| s.created)
                .unwrap_or_else(Utc::now),
            Err(_) => Utc::now(),
        };
        match self.statuses.get(classifier_id) {
            Some(Ok(status)) => Ok(Classifier::new(classifier_id, created, *status)),
            Some(Err(e)) => Err(e.clone()),
            None => Err(GatewayError::Http {
                status: 404,
                error: "Not found".to_string(),
                description: None,
            }),
        }
    }

    async fn classify(
        &self,
        classifier_id: &ClassifierId,
        text: &str,
    ) -> Result<Classification, GatewayError> {
        self.record(format!("classify:{}:{}", classifier_id, text));
        let classes = self.classes.clone()?;
        Ok(Classification {
            classifier_id: classifier_id.to_string(),
            text: text.to_string(),
            top_class: classes
                .first()
                .map(|c| c.class_name.clone())
                .unwrap_or_default(),
            classes,
        })
    }

    async fn create_classifier(
        &self,
        request: CreateClassifierRequest,
    ) -> Result<Classifier, GatewayError> {
        self.record(format!("create:{}:{}", request.name, request.language));
        let mut classifier = Classifier::new("new-classifier", Utc::now(), ClassifierStatus::Training);
        classifier.name = Some(request.name);
        classifier.language = Some(request.language);
        Ok(classifier)
    }
}

/// In-memory answer database.
pub(crate) struct MockRepository {
    docs: Mutex<HashMap<String, AnswerDocument>>,
    settings: Option<AppSettings>,
    database_exists: Mutex<bool>,
    design_conflict: bool,
    failure: Option<StoreError>,
    pub(crate) designs: Mutex<Vec<DesignDocument>>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl MockRepository {
    pub(crate) fn new() -> Self {
        Self {
            docs: Mutex::new(HashMap::new()),
            settings: None,
            database_exists: Mutex::new(true),
            design_conflict: false,
            failure: None,
            designs: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_answer(self, class_name: &str, message: &str) -> Self {
        self.docs.lock().unwrap().insert(
            class_name.to_string(),
            AnswerDocument::new(class_name, message),
        );
        self
    }

    pub(crate) fn with_document(self, doc: AnswerDocument) -> Self {
        self.docs.lock().unwrap().insert(doc.id.clone(), doc);
        self
    }

    pub(crate) fn with_settings(mut self, name: &str) -> Self {
        self.settings = Some(AppSettings {
            name: name.to_string(),
        });
        self
    }

    pub(crate) fn without_database(self) -> Self {
        *self.database_exists.lock().unwrap() = false;
        self
    }

    pub(crate) fn with_design_conflict(mut self) -> Self {
        self.design_conflict = true;
        self
    }

    /// Make every call fail with `error`.
    pub(crate) fn failing(mut self, error: StoreError) -> Self {
        self.failure = Some(error);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(call);
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AnswerRepository for MockRepository {
    async fn get_answer(&self, class_name: &str) -> Result<AnswerDocument, StoreError> {
        self.record(format!("get:{}", class_name))?;
        self.docs
            .lock()
            .unwrap()
            .get(class_name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(class_name.to_string()))
    }

    async fn get_app_settings(&self) -> Result<AppSettings, StoreError> {
        self.record("settings".to_string())?;
        self.settings
            .clone()
            .ok_or_else(|| StoreError::NotFound("app_settings".to_string()))
    }

    async fn ensure_database(&self) -> Result<DatabaseStatus, StoreError> {
        self.record("ensure_database".to_string())?;
        let mut exists = self.database_exists.lock().unwrap();
        if *exists {
            Ok(DatabaseStatus::AlreadyExists)
        } else {
            *exists = true;
            Ok(DatabaseStatus::Created)
        }
    }

    async fn put_design_document(&self, design: &DesignDocument) -> Result<(), StoreError> {
        self.record("put_design".to_string())?;
        if self.design_conflict {
            return Err(StoreError::Conflict(design.id.clone()));
        }
        self.designs.lock().unwrap().push(design.clone());
        Ok(())
    }

    async fn bulk_insert(
        &self,
        docs: Vec<serde_json::Value>,
    ) -> Result<Vec<BulkResult>, StoreError> {
        self.record(format!("bulk:{}", docs.len()))?;
        let mut stored = self.docs.lock().unwrap();
        let mut results = Vec::new();
        for value in docs {
            match serde_json::from_value::<AnswerDocument>(value) {
                Ok(doc) if stored.contains_key(&doc.id) => results.push(BulkResult {
                    id: doc.id,
                    rev: None,
                    error: Some("conflict".to_string()),
                    reason: Some("Document update conflict.".to_string()),
                }),
                Ok(doc) => {
                    results.push(BulkResult {
                        id: doc.id.clone(),
                        rev: Some("1-mock".to_string()),
                        error: None,
                        reason: None,
                    });
                    stored.insert(doc.id.clone(), doc);
                }
                Err(e) => results.push(BulkResult {
                    id: String::new(),
                    rev: None,
                    error: Some("bad_request".to_string()),
                    reason: Some(e.to_string()),
                }),
            }
        }
        Ok(results)
    }

    async fn list_answers(&self) -> Result<Vec<AnswerDocument>, StoreError> {
        self.record("list".to_string())?;
        let mut docs: Vec<_> = self.docs.lock().unwrap().values().cloned().collect();
        docs.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(docs)
    }
}
