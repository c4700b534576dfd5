//! Wire types of the CouchDB-compatible HTTP API.

use qa_domain::AnswerDocument;
use serde::{Deserialize, Serialize};

pub const BULK_DOCS: &str = "_bulk_docs";
pub const DESIGN: &str = "_design";
pub const VIEW: &str = "_view";

/// Whether `id` can name a stored document.
///
/// Empty ids address the database itself and `_`-prefixed ids are
/// server endpoints (`_all_docs`, `_design_docs`, ...).
pub fn is_document_id(id: &str) -> bool {
    !id.is_empty() && !id.starts_with('_')
}

/// Error body returned with non-success statuses: `{"error", "reason"}`
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, tolerating non-JSON payloads.
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }
}

/// Body of `POST /{db}/_bulk_docs`
#[derive(Debug, Serialize)]
pub struct BulkDocsRequest {
    pub docs: Vec<serde_json::Value>,
}

/// Response of a view query
#[derive(Debug, Deserialize)]
pub struct ViewResponse<V> {
    #[serde(default)]
    pub total_rows: Option<u64>,
    pub rows: Vec<ViewRow<V>>,
}

#[derive(Debug, Deserialize)]
pub struct ViewRow<V> {
    pub id: String,
    pub value: V,
}

/// Rows of the answers `list` view
pub type AnswerListResponse = ViewResponse<AnswerDocument>;
