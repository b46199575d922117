//! Workout splits and the weekly split schedule

use std::fmt;

use serde::{Deserialize, Serialize};

/// Workout category cycling across training days
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Push,
    Pull,
    Legs,
    Upper,
    Lower,
    Arms,
    Full,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Push => "push",
            Split::Pull => "pull",
            Split::Legs => "legs",
            Split::Upper => "upper",
            Split::Lower => "lower",
            Split::Arms => "arms",
            Split::Full => "full",
        }
    }

    pub fn all() -> &'static [Split] {
        &[
            Split::Push,
            Split::Pull,
            Split::Legs,
            Split::Upper,
            Split::Lower,
            Split::Arms,
            Split::Full,
        ]
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Split rotation for a given number of training days per week
pub fn cycle_for(days: u32) -> &'static [Split] {
    match days {
        6 => &[Split::Push, Split::Pull, Split::Legs],
        5 => &[Split::Upper, Split::Lower, Split::Arms],
        4 => &[Split::Upper, Split::Lower],
        _ => &[Split::Full],
    }
}
