//! Export/import document (`firstrep-v3`)

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::chat::ChatMessage;
use crate::error::ImportError;
use crate::history::History;
use crate::records::PersonalRecords;
use crate::split::Split;

pub const EXPORT_VERSION: &str = "firstrep-v3";

/// Complete snapshot of persisted state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub day_index: u64,
    pub split_var_index: BTreeMap<Split, u64>,
    pub history: History,
    pub prs: PersonalRecords,
    pub chat: Vec<ChatMessage>,
}

impl ExportDocument {
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Fields of an import document that are present with the expected type.
/// Anything missing or mistyped stays `None` and is left alone on apply.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportDocument {
    pub day_index: Option<u64>,
    pub split_var_index: Option<BTreeMap<Split, u64>>,
    pub history: Option<History>,
    pub prs: Option<PersonalRecords>,
    pub chat: Option<Vec<ChatMessage>>,
}

impl ImportDocument {
    pub fn parse(text: &str) -> Result<Self, ImportError> {
        let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
        let Value::Object(fields) = value else {
            return Err(ImportError::NotAnObject);
        };

        Ok(Self {
            day_index: field(&fields, "dayIndex", Value::is_number),
            split_var_index: field(&fields, "splitVarIndex", Value::is_object),
            history: field(&fields, "history", Value::is_array),
            prs: field(&fields, "prs", Value::is_object),
            chat: field(&fields, "chat", Value::is_array),
        })
    }

    /// Names of the fields that will be applied
    pub fn present_fields(&self) -> Vec<&'static str> {
        [
            ("dayIndex", self.day_index.is_some()),
            ("splitVarIndex", self.split_var_index.is_some()),
            ("history", self.history.is_some()),
            ("prs", self.prs.is_some()),
            ("chat", self.chat.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

fn field<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    name: &str,
    expected: fn(&Value) -> bool,
) -> Option<T> {
    let value = fields.get(name).filter(|v| expected(v))?;
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::warn!("Skipping import field {}: {}", name, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_only_history() {
        let doc = ImportDocument::parse(r#"{"history": []}"#).unwrap();
        assert_eq!(doc.history, Some(History::default()));
        assert_eq!(doc.present_fields(), vec!["history"]);
    }

    #[test]
    fn test_parse_skips_mistyped_fields() {
        let doc = ImportDocument::parse(
            r#"{"dayIndex": "7", "splitVarIndex": {"push": 2}, "prs": [], "chat": {}}"#,
        )
        .unwrap();
        assert_eq!(doc.day_index, None);
        assert_eq!(doc.split_var_index.map(|m| m[&Split::Push]), Some(2));
        assert_eq!(doc.prs, None);
        assert_eq!(doc.chat, None);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(ImportDocument::parse("{oops"), Err(ImportError::Parse(_))));
        assert!(matches!(ImportDocument::parse("[1, 2]"), Err(ImportError::NotAnObject)));
        assert!(matches!(ImportDocument::parse("null"), Err(ImportError::NotAnObject)));
    }

    #[test]
    fn test_parse_full_export() {
        let text = r#"{
            "version": "firstrep-v3",
            "exportedAt": "2024-03-01T09:30:00.000Z",
            "dayIndex": 12,
            "splitVarIndex": {"upper": 4, "lower": 3},
            "history": [],
            "prs": {"Leg Press": {"weight": 270, "reps": 10, "achievedAt": "2024-02-28T18:00:00.000Z"}},
            "chat": [{"id": "w_1_f", "at": "2024-02-28T18:01:00.000Z", "role": "user", "text": "rest?"}]
        }"#;
        let doc = ImportDocument::parse(text).unwrap();
        assert_eq!(doc.day_index, Some(12));
        assert_eq!(doc.prs.as_ref().and_then(|p| p.get("Leg Press")).map(|r| r.reps), Some(10));
        assert_eq!(doc.chat.as_ref().map(|c| c.len()), Some(1));
        assert_eq!(doc.present_fields().len(), 5);
    }
}
