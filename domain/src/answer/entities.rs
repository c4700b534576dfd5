//! Documents stored in the answer database

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key of the singleton application settings document
pub const APP_SETTINGS_ID: &str = "app_settings";

/// Name used when no settings document exists
pub const DEFAULT_APP_NAME: &str = "Q&A Chatbot";

/// A pre-stored answer, keyed by the class name it answers (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_rev", default, skip_serializing_if = "Option::is_none")]
    pub rev: Option<String>,
    #[serde(default)]
    pub message: String,
    /// Example questions for this class; informational only
    #[serde(default)]
    pub questions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<serde_json::Value>,
}

impl AnswerDocument {
    pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: class_name.into(),
            rev: None,
            message: message.into(),
            questions: Vec::new(),
            option: None,
        }
    }
}

/// Application settings document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_APP_NAME.to_string(),
        }
    }
}

/// Map function of the `list` view: every answer document except the settings.
pub const DEFAULT_LIST_MAP: &str = r#"function (doc) {
    if (doc._id !== 'app_settings') {
        var row = {
            "_id": doc._id,
            "_rev": doc._rev,
            "message": doc.message,
            "questions": doc.questions
        };
        emit(doc._id, row);
    }
}"#;

/// A single view of a design document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub map: String,
}

/// Design document that lets the database enumerate answer documents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub views: BTreeMap<String, View>,
}

impl DesignDocument {
    pub const ID: &'static str = "_design/answers";
    pub const NAME: &'static str = "answers";
    pub const LIST_VIEW: &'static str = "list";

    /// Build the answers design document, optionally replacing the map source.
    pub fn answers(map_override: Option<&str>) -> Self {
        let map = map_override
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(DEFAULT_LIST_MAP)
            .to_string();

        let mut views = BTreeMap::new();
        views.insert(Self::LIST_VIEW.to_string(), View { map });

        Self {
            id: Self::ID.to_string(),
            views,
        }
    }
}
