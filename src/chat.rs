//! Chat helper - offline coach with canned answers

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

impl ChatRole {
    pub fn label(&self) -> &'static str {
        match self {
            ChatRole::User => "You",
            ChatRole::Bot => "Coach",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub at: DateTime<Utc>,
    pub role: ChatRole,
    pub text: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatMode {
    #[default]
    Offline,
    /// Placeholder for a remote coach; no backend is wired in
    Api,
}

impl ChatMode {
    pub fn badge(&self) -> &'static str {
        match self {
            ChatMode::Offline => "Offline Coach",
            ChatMode::Api => "API Coach",
        }
    }
}

impl FromStr for ChatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "offline" => Ok(ChatMode::Offline),
            "api" => Ok(ChatMode::Api),
            other => Err(format!("unknown chat mode: {other}")),
        }
    }
}

const API_NOT_CONFIGURED: &str =
    "API mode is not configured in this build. Use offline coach or add a backend endpoint.";

/// Keyword rule: first rule with any matching keyword answers
struct Rule {
    keywords: &'static [&'static str],
    answer: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["rest", "how long"],
        answer: &[
            "Rest guidance (simple rule):",
            "• 1–5 reps: 3–5 min",
            "• 6–10 reps: 2–3 min",
            "• 10–12 reps: 1–2 min",
            "• 12–20 reps: 45–90 sec",
            "",
            "If your last set was truly hard, take the high end of the range.",
        ],
    },
    Rule {
        keywords: &["pr", "progress"],
        answer: &[
            "For PRs, focus on one of these per session:",
            "1) Add 2.5–5 lb (upper body) or 5–10 lb (lower body), OR",
            "2) Add 1 rep at the same weight, OR",
            "3) Improve form/tempo and keep the same reps/weight.",
            "",
            "Your job is consistency. Small wins compound.",
        ],
    },
    Rule {
        keywords: &["form", "hurt", "pain"],
        answer: &[
            "If something hurts (sharp pain), stop that movement.",
            "Switch to an alternative, reduce range of motion, and lower load.",
            "General cues:",
            "• Rows: feel mid-back, keep ribs down, avoid shrugging.",
            "• Press: shoulder blades stable, elbows not flared aggressively.",
            "",
            "If pain persists across sessions, consider a qualified clinician.",
        ],
    },
    Rule {
        keywords: &["busy", "equipment", "taken"],
        answer: &[
            "If equipment is busy:",
            "1) Check the alternatives listed under the exercise.",
            "2) Keep the same pattern: press, row/pull, squat/hinge, core.",
            "3) Match the rep range in the plan and keep rest similar.",
        ],
    },
    Rule {
        keywords: &["sets"],
        answer: &[
            "Beginner default: 2–4 sets per exercise.",
            "Use these rules:",
            "• Short time: 2 sets",
            "• Normal time: 3 sets",
            "• Long time / feeling great: 4 sets",
            "",
            "Quality reps beat junk volume.",
        ],
    },
];

const FALLBACK: &[&str] = &[
    "I can help with:",
    "• exercise form cues",
    "• rest time and pacing",
    "• substitutions when equipment is busy",
    "• how to progress reps/weight",
    "",
    "Ask your question with the exercise name and what you're feeling.",
];

/// Canned answer for a question
pub fn reply(mode: ChatMode, question: &str) -> String {
    if mode == ChatMode::Api {
        return API_NOT_CONFIGURED.to_string();
    }

    let text = question.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| text.contains(k)))
        .map(|rule| rule.answer)
        .unwrap_or(FALLBACK)
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("How long should I rest?", "Rest guidance")]
    #[case("any tips to progress", "For PRs")]
    #[case("my shoulder PAIN", "If something hurts")]
    #[case("the rack is taken", "If equipment is busy")]
    #[case("How many sets?", "Beginner default")]
    #[case("hello", "I can help with")]
    fn test_offline_reply(#[case] question: &str, #[case] starts_with: &str) {
        assert!(reply(ChatMode::Offline, question).starts_with(starts_with));
    }

    #[test]
    fn test_rules_checked_in_order() {
        // mentions both rest and sets, rest comes first
        assert!(reply(ChatMode::Offline, "rest between sets").starts_with("Rest guidance"));
    }

    #[test]
    fn test_api_mode_not_configured() {
        assert_eq!(reply(ChatMode::Api, "rest?"), API_NOT_CONFIGURED);
    }

    #[test]
    fn test_chat_mode_from_str() {
        assert_eq!("API".parse::<ChatMode>(), Ok(ChatMode::Api));
        assert_eq!("offline".parse::<ChatMode>(), Ok(ChatMode::Offline));
        assert!("remote".parse::<ChatMode>().is_err());
    }

    #[test]
    fn test_message_json_shape() {
        let msg = ChatMessage {
            id: "w_1_a".to_string(),
            at: Utc::now(),
            role: ChatRole::Bot,
            text: "hi".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "bot");
        assert_eq!(ChatRole::User.label(), "You");
    }
}
