//! Q&A model
//!
//! Orchestrates classifier resolution, classification and answer lookup.
//!
//! # Flow
//!
//! ```text
//! ask(text)
//!   ├─ classifier id cached? ── no ──> ClassifierResolver::resolve (cached on success)
//!   ├─ ClassifyTextUseCase::execute(id, text, 1)
//!   └─ AnswerLookup::get(top.class_name, top.confidence)
//! ```
//!
//! Every failure is returned as an [`Answer`] with an empty class name, so
//! callers handle one shape only.

use crate::config::QaParams;
use crate::ports::answer_log::{AnswerLog, AnswerRecord, AskKind};
use crate::ports::answer_repository::AnswerRepository;
use crate::ports::classifier_gateway::ClassifierGateway;
use crate::use_cases::classifier_cache::ClassifierIdCache;
use crate::use_cases::classify_text::ClassifyTextUseCase;
use crate::use_cases::lookup_answer::AnswerLookup;
use crate::use_cases::resolve_classifier::ClassifierResolver;
use futures::future::join_all;
use qa_domain::{Answer, AnswerError, AppSettings, ClassScore, ClassifierId, TopN};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Question answering over a classifier service and an answer store
pub struct QaModel<G: ClassifierGateway + 'static, R: AnswerRepository + 'static> {
    resolver: ClassifierResolver<G>,
    classifier: ClassifyTextUseCase<G>,
    answers: AnswerLookup<R>,
    cache: ClassifierIdCache,
    params: QaParams,
    answer_log: Option<Arc<dyn AnswerLog>>,
}

impl<G: ClassifierGateway + 'static, R: AnswerRepository + 'static> QaModel<G, R> {
    pub fn new(gateway: Arc<G>, repository: Arc<R>, params: QaParams) -> Self {
        Self {
            resolver: ClassifierResolver::new(Arc::clone(&gateway)),
            classifier: ClassifyTextUseCase::new(gateway),
            answers: AnswerLookup::new(repository),
            cache: ClassifierIdCache::new(params.classifier_id.clone()),
            params,
            answer_log: None,
        }
    }

    /// Record every answered question in `log`
    pub fn with_answer_log(mut self, log: Arc<dyn AnswerLog>) -> Self {
        self.answer_log = Some(log);
        self
    }

    /// Abort remote calls when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.resolver = self.resolver.with_cancellation(token.clone());
        self.classifier = self.classifier.with_cancellation(token.clone());
        self.answers = self.answers.with_cancellation(token);
        self
    }

    // ==================== Classifier id ====================

    /// The cached classifier id, without triggering resolution.
    pub async fn classifier_id(&self) -> Option<ClassifierId> {
        self.cache.get().await
    }

    /// Pin the classifier id, replacing any cached value.
    pub async fn set_classifier_id(&self, id: ClassifierId) {
        self.cache.set(id).await;
    }

    /// Forget the cached id; the next question resolves it again.
    pub async fn reset_classifier(&self) {
        if let Some(previous) = self.cache.reset().await {
            info!("Classifier id {} reset", previous);
        }
    }

    /// Return the cached id, resolving it from the service when unset.
    ///
    /// A failed resolution is not cached. Fails only when cancelled.
    pub async fn ensure_classifier_id(&self) -> Result<Option<ClassifierId>, AnswerError> {
        if let Some(id) = self.cache.get().await {
            return Ok(Some(id));
        }

        debug!("Classifier id unresolved, resolving");
        let resolved = self.resolver.resolve().await?;
        if let Some(id) = &resolved {
            self.cache.set(id.clone()).await;
        }
        Ok(resolved)
    }

    // ==================== Questions ====================

    /// Answer `text` with the top-ranked class.
    pub async fn ask(&self, text: &str) -> Answer {
        let answer = match self.try_ask_top(text, TopN::MIN).await {
            Ok(answers) => answers
                .into_iter()
                .next()
                .unwrap_or_else(|| AnswerError::upstream("no classes returned", None).into()),
            Err(e) => e.into(),
        };

        self.record(AskKind::Ask, text, true, vec![answer.clone()]).await;
        answer
    }

    /// Answer `text` with up to `top_n` ranked classes, each joined with its
    /// stored answer. Defaults to the configured depth.
    ///
    /// A failure before the lookups yields a single error answer; a failed
    /// lookup yields an error answer in that class's position.
    pub async fn ask_top(&self, text: &str, top_n: Option<usize>) -> Vec<Answer> {
        let top_n = top_n.unwrap_or(self.params.top_n.get());
        let answers = match self.try_ask_top(text, top_n).await {
            Ok(answers) => answers,
            Err(e) => vec![e.into()],
        };

        self.record(AskKind::AskTop, text, true, answers.clone()).await;
        answers
    }

    /// Look up an answer directly by class name; confidence is always 0.
    pub async fn ask_class_name(&self, class_name: &str) -> Answer {
        let answer: Answer = self.answers.get(class_name, 0.0).await.into();
        self.record(AskKind::AskClassName, class_name, false, vec![answer.clone()]).await;
        answer
    }

    /// Classify `text` without looking up answers.
    pub async fn classify(&self, text: &str, top_n: usize) -> Result<Vec<ClassScore>, AnswerError> {
        TopN::new(top_n).map_err(|e| AnswerError::InvalidRequest(e.to_string()))?;
        let classifier_id = self.ensure_classifier_id().await?;
        self.classifier
            .execute(classifier_id.as_ref(), text, top_n)
            .await
    }

    pub async fn app_settings(&self) -> AppSettings {
        self.answers.app_settings().await
    }

    async fn try_ask_top(&self, text: &str, top_n: usize) -> Result<Vec<Answer>, AnswerError> {
        let classes = self.classify(text, top_n).await?;

        let lookups = classes
            .iter()
            .map(|class| self.answers.get(&class.class_name, class.confidence));

        Ok(join_all(lookups)
            .await
            .into_iter()
            .map(Answer::from)
            .collect())
    }

    async fn record(&self, kind: AskKind, question: &str, classified: bool, answers: Vec<Answer>) {
        let Some(log) = &self.answer_log else {
            return;
        };
        let classifier_id = if classified {
            self.cache.get().await
        } else {
            None
        };
        log.record(&AnswerRecord::new(kind, question, classifier_id, answers));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::classifier_gateway::GatewayError;
    use crate::use_cases::test_support::{MockGateway, MockRepository};
    use qa_domain::ClassifierStatus;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryLog {
        records: Mutex<Vec<AnswerRecord>>,
    }

    impl AnswerLog for MemoryLog {
        fn record(&self, record: &AnswerRecord) {
            self.records.lock().unwrap().push(record.clone());
        }
    }

    fn model(gateway: MockGateway, repository: MockRepository) -> QaModel<MockGateway, MockRepository> {
        QaModel::new(Arc::new(gateway), Arc::new(repository), QaParams::default())
    }

    fn store() -> MockRepository {
        MockRepository::new()
            .with_answer("general_hello", "Hello, I am Watson.")
            .with_answer("general_bye", "Goodbye.")
    }

    #[tokio::test]
    async fn test_ask_class_name_has_zero_confidence() {
        let qa = model(MockGateway::new(), store());

        for (class_name, message) in [
            ("general_hello", "Hello, I am Watson."),
            ("general_bye", "Goodbye."),
        ] {
            let answer = qa.ask_class_name(class_name).await;
            assert_eq!(answer.class_name, class_name);
            assert_eq!(answer.message, message);
            assert_eq!(answer.confidence, 0.0);
        }
    }

    #[tokio::test]
    async fn test_ask_class_name_missing_is_404_answer() {
        let qa = model(MockGateway::new(), store());

        let answer = qa.ask_class_name("general_hello_hello").await;

        assert_eq!(answer.class_name, "");
        assert_eq!(answer.message, "An error occurred. not_found (code=404)");
        assert_eq!(answer.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_ask_without_classifier_is_not_configured() {
        let qa = model(MockGateway::new(), store());

        let answer = qa.ask("").await;

        assert_eq!(answer.class_name, "");
        assert_eq!(answer.message, "Classifier is not configured.");
        assert_eq!(answer.confidence, 0.0);
    }

    #[tokio::test]
    async fn test_ask_resolves_and_joins_answer() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_classifier("A", 100, ClassifierStatus::Available)
                .with_classifier("B", 200, ClassifierStatus::Available)
                .with_classes(vec![("general_hello", 0.93), ("general_bye", 0.07)]),
        );
        let qa = QaModel::new(Arc::clone(&gateway), Arc::new(store()), QaParams::default());

        let answer = qa.ask("hello").await;

        assert_eq!(answer.class_name, "general_hello");
        assert_eq!(answer.message, "Hello, I am Watson.");
        assert_eq!(answer.confidence, 0.93);
        assert_eq!(qa.classifier_id().await.unwrap().as_str(), "B");
        assert!(gateway.calls().contains(&"classify:B:hello".to_string()));
    }

    #[tokio::test]
    async fn test_resolved_id_is_cached() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_classifier("A", 100, ClassifierStatus::Available)
                .with_classes(vec![("general_hello", 0.9)]),
        );
        let qa = QaModel::new(Arc::clone(&gateway), Arc::new(store()), QaParams::default());

        qa.ask("hello").await;
        qa.ask("hello again").await;

        assert_eq!(gateway.count("list"), 1);
        assert_eq!(gateway.count("classify:"), 2);
    }

    #[tokio::test]
    async fn test_failed_resolution_is_retried() {
        let gateway = Arc::new(MockGateway::new());
        let qa = QaModel::new(Arc::clone(&gateway), Arc::new(store()), QaParams::default());

        qa.ask("hello").await;
        qa.ask("hello").await;

        assert_eq!(gateway.count("list"), 2);
        assert!(qa.classifier_id().await.is_none());
    }

    #[tokio::test]
    async fn test_reset_forces_resolution() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_classifier("A", 100, ClassifierStatus::Available)
                .with_classes(vec![("general_hello", 0.9)]),
        );
        let qa = QaModel::new(Arc::clone(&gateway), Arc::new(store()), QaParams::default());

        qa.ask("hello").await;
        qa.reset_classifier().await;
        assert!(qa.classifier_id().await.is_none());

        qa.ask("hello").await;
        assert_eq!(gateway.count("list"), 2);
    }

    #[tokio::test]
    async fn test_configured_id_skips_resolution() {
        let gateway = Arc::new(MockGateway::new().with_classes(vec![("general_bye", 0.6)]));
        let params =
            QaParams::default().with_classifier_id(ClassifierId::from_optional(Some("pinned")));
        let qa = QaModel::new(Arc::clone(&gateway), Arc::new(store()), params);

        let answer = qa.ask("bye").await;

        assert_eq!(answer.class_name, "general_bye");
        assert_eq!(gateway.count("list"), 0);
        assert_eq!(gateway.calls(), vec!["classify:pinned:bye".to_string()]);
    }

    #[tokio::test]
    async fn test_classify_error_becomes_error_answer() {
        let gateway = MockGateway::new()
            .with_classifier("A", 100, ClassifierStatus::Available)
            .with_classify_error(GatewayError::Http {
                status: 400,
                error: "Missing required parameter: text".to_string(),
                description: None,
            });
        let qa = model(gateway, store());

        let answer = qa.ask("").await;

        assert!(answer.is_error());
        assert_eq!(
            answer.message,
            "An error occurred. Missing required parameter: text (code=400)"
        );
    }

    #[tokio::test]
    async fn test_top_class_without_answer_is_404() {
        let gateway = MockGateway::new()
            .with_classifier("A", 100, ClassifierStatus::Available)
            .with_classes(vec![("unknown_class", 0.8)]);
        let qa = model(gateway, store());

        let answer = qa.ask("???").await;

        assert_eq!(answer.message, "An error occurred. not_found (code=404)");
    }

    #[tokio::test]
    async fn test_ask_top_joins_each_class() {
        let gateway = MockGateway::new()
            .with_classifier("A", 100, ClassifierStatus::Available)
            .with_classes(vec![
                ("general_hello", 0.7),
                ("general_bye", 0.2),
                ("missing", 0.1),
            ]);
        let qa = model(gateway, store());

        let answers = qa.ask_top("hi", Some(3)).await;

        assert_eq!(answers.len(), 3);
        assert_eq!(answers[0].class_name, "general_hello");
        assert_eq!(answers[1].class_name, "general_bye");
        assert_eq!(answers[1].confidence, 0.2);
        assert!(answers[2].is_error());
    }

    #[tokio::test]
    async fn test_ask_top_rejects_out_of_range_before_network() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_classifier("A", 100, ClassifierStatus::Available)
                .with_classes(vec![("general_hello", 0.7)]),
        );
        let qa = QaModel::new(Arc::clone(&gateway), Arc::new(store()), QaParams::default());

        let answers = qa.ask_top("hi", Some(11)).await;

        assert_eq!(answers.len(), 1);
        assert!(answers[0].is_error());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_model_returns_cancelled_answer() {
        let token = CancellationToken::new();
        token.cancel();
        let params =
            QaParams::default().with_classifier_id(ClassifierId::from_optional(Some("pinned")));
        let gateway = Arc::new(MockGateway::new().with_classes(vec![("general_hello", 0.9)]));
        let qa = QaModel::new(Arc::clone(&gateway), Arc::new(store()), params)
            .with_cancellation(token);

        let answer = qa.ask("hello").await;

        assert_eq!(answer.message, "Request cancelled.");
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_resolution_returns_cancelled_answer() {
        let token = CancellationToken::new();
        token.cancel();
        let gateway = Arc::new(
            MockGateway::new()
                .with_classifier("A", 100, ClassifierStatus::Available)
                .with_classes(vec![("general_hello", 0.9)]),
        );
        let qa = QaModel::new(Arc::clone(&gateway), Arc::new(store()), QaParams::default())
            .with_cancellation(token);

        let answer = qa.ask("hello").await;

        assert_eq!(answer.message, "Request cancelled.");
        assert_eq!(qa.ensure_classifier_id().await, Err(AnswerError::Cancelled));
        assert!(qa.classifier_id().await.is_none());
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_class_name_lookup_is_recorded_without_classifier() {
        let log = Arc::new(MemoryLog::default());
        let qa = model(MockGateway::new(), store()).with_answer_log(log.clone());

        qa.ask_class_name("general_hello").await;

        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].kind, AskKind::AskClassName);
        assert_eq!(records[0].question, "general_hello");
        assert!(records[0].classifier_id.is_none());
        assert_eq!(records[0].answers[0].message, "Hello, I am Watson.");
    }

    #[tokio::test]
    async fn test_ask_is_recorded_with_resolved_classifier() {
        let log = Arc::new(MemoryLog::default());
        let gateway = MockGateway::new()
            .with_classifier("A", 100, ClassifierStatus::Available)
            .with_classes(vec![("general_hello", 0.9)]);
        let qa = model(gateway, store()).with_answer_log(log.clone());

        qa.ask("hello").await;
        qa.ask_top("hello", Some(2)).await;

        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].kind, AskKind::Ask);
        assert_eq!(records[0].classifier_id.as_ref().unwrap().as_str(), "A");
        assert_eq!(records[0].answers[0].class_name, "general_hello");
        assert_eq!(records[1].kind, AskKind::AskTop);
    }

    #[tokio::test]
    async fn test_app_settings_passthrough() {
        let qa = model(MockGateway::new(), MockRepository::new().with_settings("Diet Trainer"));
        assert_eq!(qa.app_settings().await.name, "Diet Trainer");
    }
}
