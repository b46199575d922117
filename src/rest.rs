//! Rest guidance derived from an exercise's target rep range

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Recommended rest between sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestAdvice {
    pub rest: String,
    pub note: String,
}

#[derive(Debug, Clone, Copy)]
pub struct RestRule {
    pub min: u32,
    pub max: u32,
    pub rest: &'static str,
    pub note: &'static str,
}

/// Checked in order: neighbouring ranges share their boundary
pub const REST_RULES: &[RestRule] = &[
    RestRule { min: 1, max: 5, rest: "3–5 min", note: "Heavy strength work" },
    RestRule { min: 6, max: 10, rest: "2–3 min", note: "Strength / hypertrophy" },
    RestRule { min: 10, max: 12, rest: "1–2 min", note: "Hypertrophy" },
    RestRule { min: 12, max: 20, rest: "45–90 sec", note: "Higher reps / conditioning" },
];

const DEFAULT_REST: &str = "1–2 min";

/// Rule-table lookup from rep range to rest advice
#[derive(Debug, Clone)]
pub struct RestGuide {
    rules: Vec<RestRule>,
}

impl Default for RestGuide {
    fn default() -> Self {
        Self::new(REST_RULES.to_vec())
    }
}

impl RestGuide {
    pub fn new(rules: Vec<RestRule>) -> Self {
        Self { rules }
    }

    /// Advice for a range like "6-10"; unparseable input gets the default
    pub fn rest_for(&self, rep_range: &str) -> RestAdvice {
        let Some((min, max)) = parse_rep_range(rep_range) else {
            return default_advice();
        };

        self.rules
            .iter()
            .find(|r| min >= r.min && max <= r.max)
            .or_else(|| self.rules.iter().find(|r| min >= r.min && min <= r.max))
            .map(|r| RestAdvice {
                rest: r.rest.to_string(),
                note: r.note.to_string(),
            })
            .unwrap_or_else(default_advice)
    }
}

fn default_advice() -> RestAdvice {
    RestAdvice {
        rest: DEFAULT_REST.to_string(),
        note: String::new(),
    }
}

static REP_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)").expect("rep range pattern is valid"));

/// Find the first `<digits> - <digits>` pair anywhere in the input
pub fn parse_rep_range(input: &str) -> Option<(u32, u32)> {
    let caps = REP_RANGE.captures(input)?;
    let min = caps[1].parse().ok()?;
    let max = caps[2].parse().ok()?;
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1-5", "3–5 min", "Heavy strength work")]
    #[case("6-10", "2–3 min", "Strength / hypertrophy")]
    #[case("10-12", "1–2 min", "Hypertrophy")]
    #[case("12-15", "45–90 sec", "Higher reps / conditioning")]
    #[case("8-12", "2–3 min", "Strength / hypertrophy")]
    #[case("30-60", "1–2 min", "")]
    #[case("garbage", "1–2 min", "")]
    #[case("", "1–2 min", "")]
    fn test_rest_for(#[case] input: &str, #[case] rest: &str, #[case] note: &str) {
        let advice = RestGuide::default().rest_for(input);
        assert_eq!(advice.rest, rest);
        assert_eq!(advice.note, note);
    }

    #[test]
    fn test_rest_for_falls_back_to_min() {
        // 4-8 is not contained by any rule, 4 lies in 1-5
        let advice = RestGuide::default().rest_for("4-8");
        assert_eq!(advice.rest, "3–5 min");

        // 8-12 spans two rules, 8 lies in 6-10
        let advice = RestGuide::default().rest_for("8-12");
        assert_eq!(advice.note, "Strength / hypertrophy");
    }

    #[rstest]
    #[case("6-10", Some((6, 10)))]
    #[case(" 6 -  10 ", Some((6, 10)))]
    #[case("reps: 12-15", Some((12, 15)))]
    #[case("10", None)]
    #[case("10-", None)]
    #[case("a-b", None)]
    #[case("6\u{00A0}-\u{00A0}10", Some((6, 10)))]
    #[case("8\u{2009}-\u{2009}12", Some((8, 12)))]
    fn test_parse_rep_range(#[case] input: &str, #[case] expected: Option<(u32, u32)>) {
        assert_eq!(parse_rep_range(input), expected);
    }

    #[test]
    fn test_rest_for_unicode_spacing() {
        let advice = RestGuide::default().rest_for("6\u{00A0}-\u{00A0}10");
        assert_eq!(advice.rest, "2–3 min");
        assert_eq!(advice.note, "Strength / hypertrophy");
    }

    #[test]
    fn test_custom_rules() {
        let guide = RestGuide::new(vec![RestRule {
            min: 1,
            max: 100,
            rest: "forever",
            note: "fixture",
        }]);
        assert_eq!(guide.rest_for("30-60").rest, "forever");
    }
}
