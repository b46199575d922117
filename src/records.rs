//! Personal records - best weight × reps per exercise name

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SaveError;
use crate::history::LoggedExercise;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalRecord {
    pub weight: f64,
    pub reps: u32,
    pub achieved_at: DateTime<Utc>,
}

impl PersonalRecord {
    /// Heavier wins; at equal weight more reps win
    pub fn beats(&self, current: &PersonalRecord) -> bool {
        self.weight > current.weight || (self.weight == current.weight && self.reps > current.reps)
    }
}

/// New best for one exercise
#[derive(Debug, Clone, PartialEq)]
pub struct Improvement {
    pub name: String,
    pub previous: Option<PersonalRecord>,
    pub new: PersonalRecord,
}

/// PR table keyed by exercise name. Variations sharing a name share a PR.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonalRecords {
    records: BTreeMap<String, PersonalRecord>,
}

impl PersonalRecords {
    pub fn new(records: BTreeMap<String, PersonalRecord>) -> Self {
        Self { records }
    }

    pub fn get(&self, name: &str) -> Option<&PersonalRecord> {
        self.records.get(name)
    }

    /// Sorted by exercise name
    pub fn iter(&self) -> impl Iterator<Item = (&String, &PersonalRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fold logged results into the table.
    ///
    /// Rejects the whole submission when nothing was entered. Only entries
    /// with both weight and reps can set a record. Improvements come back
    /// in session order.
    pub fn apply_results(
        &mut self,
        entries: &[LoggedExercise],
        at: DateTime<Utc>,
    ) -> Result<Vec<Improvement>, SaveError> {
        if !entries.iter().any(LoggedExercise::has_entry) {
            return Err(SaveError::EmptySubmission);
        }

        let mut improvements = Vec::new();
        for entry in entries {
            let (Some(weight), Some(reps)) = (entry.weight, entry.reps) else {
                continue;
            };
            let candidate = PersonalRecord { weight, reps, achieved_at: at };
            let previous = self.records.get(&entry.name).cloned();
            if previous.as_ref().is_none_or(|current| candidate.beats(current)) {
                self.records.insert(entry.name.clone(), candidate.clone());
                improvements.push(Improvement {
                    name: entry.name.clone(),
                    previous,
                    new: candidate,
                });
            }
        }

        Ok(improvements)
    }
}

/// Weight/reps typed by the user for one exercise position
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResultEntry {
    pub weight: Option<f64>,
    pub reps: Option<u32>,
}

impl FromStr for ResultEntry {
    type Err = std::convert::Infallible;

    /// `135x8`, `135x`, `x8`, `-` or empty; anything unusable becomes blank
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "-" {
            return Ok(Self::default());
        }
        let (weight, reps) = match s.split_once(['x', 'X', '×']) {
            Some((w, r)) => (w, r),
            None => (s, ""),
        };
        Ok(Self {
            weight: sanitize_weight(weight),
            reps: sanitize_reps(reps),
        })
    }
}

/// Blank, non-numeric, negative or non-finite input → `None`
pub fn sanitize_weight(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite() && *n >= 0.0)
}

pub fn sanitize_reps(raw: &str) -> Option<u32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<u32>().ok()
}

/// Celebration text listing up to four new records
pub fn format_congrats(improvements: &[Improvement]) -> String {
    let lines: Vec<String> = improvements
        .iter()
        .take(4)
        .map(|hit| {
            let old = match &hit.previous {
                Some(p) => format!("{} lbs × {}", p.weight, p.reps),
                None => "First record!".to_string(),
            };
            format!("• {}: {} → {} lbs × {}", hit.name, old, hit.new.weight, hit.new.reps)
        })
        .collect();

    let more = if improvements.len() > 4 {
        format!("\n(+{} more PRs)", improvements.len() - 4)
    } else {
        String::new()
    };

    format!(
        "PR HIT. CONGRATS.\n\n{}{}\n\nKeep going. Small wins compound.",
        lines.join("\n"),
        more
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn logged(name: &str, weight: Option<f64>, reps: Option<u32>) -> LoggedExercise {
        LoggedExercise {
            name: name.to_string(),
            rep_range: "8-12".to_string(),
            weight,
            reps,
            sets: 3,
        }
    }

    fn pr(weight: f64, reps: u32) -> PersonalRecord {
        PersonalRecord { weight, reps, achieved_at: Utc::now() }
    }

    #[rstest]
    #[case(100.0, 10, true)]
    #[case(105.0, 1, true)]
    #[case(100.0, 8, false)]
    #[case(100.0, 6, false)]
    #[case(95.0, 12, false)]
    fn test_beats(#[case] weight: f64, #[case] reps: u32, #[case] expected: bool) {
        assert_eq!(pr(weight, reps).beats(&pr(100.0, 8)), expected);
    }

    #[test]
    fn test_first_record() {
        let mut prs = PersonalRecords::default();
        let hits = prs
            .apply_results(&[logged("Plank", Some(0.0), Some(1))], Utc::now())
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].previous.is_none());
        assert_eq!(prs.get("Plank").map(|r| r.reps), Some(1));
    }

    #[test]
    fn test_reps_tie_break() {
        let old = pr(100.0, 8);
        let mut prs = PersonalRecords::default();
        prs.records.insert("Lat Pulldown".to_string(), old.clone());

        let hits = prs
            .apply_results(&[logged("Lat Pulldown", Some(100.0), Some(10))], Utc::now())
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].previous, Some(old));
        assert_eq!(prs.get("Lat Pulldown").map(|r| r.reps), Some(10));
    }

    #[test]
    fn test_lower_weight_is_not_improvement() {
        let old = pr(100.0, 8);
        let mut prs = PersonalRecords::default();
        prs.records.insert("Lat Pulldown".to_string(), old.clone());

        let hits = prs
            .apply_results(&[logged("Lat Pulldown", Some(95.0), Some(12))], Utc::now())
            .unwrap();
        assert!(hits.is_empty());
        assert_eq!(prs.get("Lat Pulldown"), Some(&old));
    }

    #[test]
    fn test_empty_submission_rejected() {
        let mut prs = PersonalRecords::default();
        let result = prs.apply_results(
            &[logged("A", None, None), logged("B", None, None)],
            Utc::now(),
        );
        assert_eq!(result, Err(SaveError::EmptySubmission));
        assert!(prs.is_empty());
    }

    #[test]
    fn test_partial_entry_not_a_candidate() {
        let mut prs = PersonalRecords::default();
        let hits = prs
            .apply_results(
                &[logged("A", Some(50.0), Some(10)), logged("B", Some(60.0), None)],
                Utc::now(),
            )
            .unwrap();
        let names: Vec<_> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["A"]);
        assert!(prs.get("B").is_none());
    }

    #[test]
    fn test_improvements_in_session_order() {
        let mut prs = PersonalRecords::default();
        let hits = prs
            .apply_results(
                &[logged("Zercher", Some(1.0), Some(1)), logged("Arnold", Some(1.0), Some(1))],
                Utc::now(),
            )
            .unwrap();
        let names: Vec<_> = hits.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Zercher", "Arnold"]);
        let sorted: Vec<_> = prs.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(sorted, vec!["Arnold", "Zercher"]);
    }

    #[test]
    fn test_same_name_in_one_session() {
        let mut prs = PersonalRecords::default();
        let hits = prs
            .apply_results(
                &[logged("Curl", Some(20.0), Some(10)), logged("Curl", Some(20.0), Some(8))],
                Utc::now(),
            )
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(prs.get("Curl").map(|r| r.reps), Some(10));
    }

    #[rstest]
    #[case("135x8", Some(135.0), Some(8))]
    #[case(" 22.5 x 12 ", Some(22.5), Some(12))]
    #[case("135x", Some(135.0), None)]
    #[case("x8", None, Some(8))]
    #[case("135", Some(135.0), None)]
    #[case("-", None, None)]
    #[case("", None, None)]
    #[case("-5x8", None, Some(8))]
    #[case("abcx8.5", None, None)]
    #[case("infx3", None, Some(3))]
    fn test_result_entry_from_str(
        #[case] input: &str,
        #[case] weight: Option<f64>,
        #[case] reps: Option<u32>,
    ) {
        let entry: ResultEntry = input.parse().unwrap();
        assert_eq!(entry, ResultEntry { weight, reps });
    }

    #[test]
    fn test_format_congrats() {
        let hits: Vec<_> = (0..6)
            .map(|i| Improvement {
                name: format!("Ex{i}"),
                previous: (i > 0).then(|| pr(100.0, 8)),
                new: pr(105.0, 8),
            })
            .collect();
        let msg = format_congrats(&hits);
        assert!(msg.starts_with("PR HIT. CONGRATS."));
        assert!(msg.contains("• Ex0: First record! → 105 lbs × 8"));
        assert!(msg.contains("• Ex1: 100 lbs × 8 → 105 lbs × 8"));
        assert!(!msg.contains("Ex4"));
        assert!(msg.contains("(+2 more PRs)"));
    }
}
