//! Workout history - most recent first

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::split::Split;

/// One exercise of a saved workout; blanks are kept as `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggedExercise {
    pub name: String,
    pub rep_range: String,
    pub weight: Option<f64>,
    pub reps: Option<u32>,
    pub sets: u32,
}

impl LoggedExercise {
    pub fn has_entry(&self) -> bool {
        self.weight.is_some() || self.reps.is_some()
    }
}

/// Saved workout, never changed after creation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub split: Split,
    #[serde(default)]
    pub variation_index: usize,
    #[serde(rename = "sets", alias = "setsPerExercise")]
    pub sets_per_exercise: u32,
    pub exercises: Vec<LoggedExercise>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: Vec<WorkoutRecord>,
}

impl History {
    pub fn new(records: Vec<WorkoutRecord>) -> Self {
        Self { records }
    }

    /// Insert at the front
    pub fn append(&mut self, record: WorkoutRecord) {
        self.records.insert(0, record);
    }

    /// Remove every record with `id`; returns how many were removed
    pub fn delete(&mut self, id: &str) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before - self.records.len()
    }

    pub fn list(&self) -> &[WorkoutRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(id: &str) -> WorkoutRecord {
        WorkoutRecord {
            id: id.to_string(),
            created_at: Utc::now(),
            split: Split::Full,
            variation_index: 0,
            sets_per_exercise: 3,
            exercises: vec![LoggedExercise {
                name: "Leg Press".to_string(),
                rep_range: "8-12".to_string(),
                weight: Some(200.0),
                reps: None,
                sets: 3,
            }],
        }
    }

    #[test]
    fn test_append_prepends() {
        let mut history = History::default();
        history.append(record("a"));
        history.append(record("b"));
        let ids: Vec<_> = history.list().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_delete_by_id() {
        let mut history = History::new(vec![record("a"), record("b")]);
        assert_eq!(history.delete("a"), 1);
        assert_eq!(history.delete("missing"), 0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.list()[0].id, "b");
    }

    #[test]
    fn test_has_entry() {
        let mut e = record("a").exercises.remove(0);
        assert!(e.has_entry());
        e.weight = None;
        assert!(!e.has_entry());
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(record("w_1_a")).unwrap();
        assert_eq!(json["sets"], 3);
        assert_eq!(json["split"], "full");
        assert_eq!(json["exercises"][0]["repRange"], "8-12");
        assert!(json["exercises"][0]["reps"].is_null());
        assert!(json["createdAt"].is_string());
    }

    #[test]
    fn test_record_without_variation_index() {
        let json = r#"{
            "id": "w_1700000000000_abc",
            "createdAt": "2024-01-02T10:00:00.000Z",
            "split": "push",
            "sets": 3,
            "exercises": [
                {"name": "Arnold Press", "repRange": "8-12", "weight": 25.5, "reps": 10, "sets": 3}
            ]
        }"#;
        let parsed: WorkoutRecord = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.variation_index, 0);
        assert_eq!(parsed.exercises[0].weight, Some(25.5));
    }
}
