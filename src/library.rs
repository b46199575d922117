//! Exercise library - split → variations → exercises
//!
//! The built-in tables are the default; a JSON file with the same shape
//! (`{"push": [[{"name", "repRange", "alternatives"}]]}`) can replace them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::split::Split;

/// One exercise of a session template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseTemplate {
    pub name: String,
    pub rep_range: String,
    #[serde(default)]
    pub alternatives: Vec<String>,
}

/// A full session template for one split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variation {
    pub exercises: Vec<ExerciseTemplate>,
}

/// Read-only exercise library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Library {
    splits: BTreeMap<Split, Vec<Variation>>,
}

impl Library {
    pub fn new(splits: BTreeMap<Split, Vec<Variation>>) -> Self {
        Self { splits }
    }

    /// The library shipped with the binary
    pub fn builtin() -> Self {
        let splits = [
            (Split::Push, PUSH),
            (Split::Pull, PULL),
            (Split::Legs, LEGS),
            (Split::Upper, UPPER),
            (Split::Lower, LOWER),
            (Split::Arms, ARMS),
            (Split::Full, FULL),
        ]
        .into_iter()
        .map(|(split, table)| (split, table.iter().copied().map(to_variation).collect()))
        .collect();

        Self { splits }
    }

    pub fn from_json(text: &str) -> Result<Self, LibraryError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, LibraryError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Variations of a split; empty when the split is missing
    pub fn variations(&self, split: Split) -> &[Variation] {
        self.splits.get(&split).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn variation_count(&self, split: Split) -> usize {
        self.variations(split).len()
    }

    /// Find an exercise by name in any split
    pub fn find_exercise(&self, name: &str) -> Option<&ExerciseTemplate> {
        self.splits
            .values()
            .flatten()
            .flat_map(|v| v.exercises.iter())
            .find(|e| e.name == name)
    }
}

impl Default for Library {
    fn default() -> Self {
        Self::builtin()
    }
}

struct Template {
    name: &'static str,
    rep_range: &'static str,
    alternatives: &'static [&'static str],
}

const fn ex(
    name: &'static str,
    rep_range: &'static str,
    alternatives: &'static [&'static str],
) -> Template {
    Template { name, rep_range, alternatives }
}

fn to_variation(table: &[Template]) -> Variation {
    Variation {
        exercises: table
            .iter()
            .map(|t| ExerciseTemplate {
                name: t.name.to_string(),
                rep_range: t.rep_range.to_string(),
                alternatives: t.alternatives.iter().map(|a| a.to_string()).collect(),
            })
            .collect(),
    }
}

const PUSH: &[&[Template]] = &[
    &[
        ex("Barbell Bench Press", "6-10", &["Dumbbell Bench Press", "Machine Chest Press", "Push-Ups"]),
        ex("Seated Dumbbell Shoulder Press", "8-12", &["Machine Shoulder Press", "Standing Dumbbell Press", "Landmine Press"]),
        ex("Incline Dumbbell Press", "8-12", &["Incline Machine Press", "Incline Barbell Press", "Push-Ups (feet elevated)"]),
        ex("Cable Tricep Pushdown", "10-12", &["Rope Pushdown", "Dips (assisted)", "Close-Grip Push-Ups"]),
    ],
    &[
        ex("Machine Chest Press", "8-12", &["Barbell Bench Press", "Dumbbell Bench Press", "Push-Ups"]),
        ex("Lateral Raises", "12-15", &["Cable Lateral Raise", "Machine Lateral Raise", "Lean-Away DB Lateral Raise"]),
        ex("Incline Machine Press", "10-12", &["Incline DB Press", "Incline Barbell Press", "Push-Ups (feet elevated)"]),
        ex("Overhead Tricep Extension", "10-12", &["Cable OH Extension", "Skull Crushers", "Close-Grip Bench (light)"]),
    ],
    &[
        ex("Dumbbell Bench Press", "8-12", &["Machine Chest Press", "Barbell Bench Press", "Push-Ups"]),
        ex("Arnold Press", "8-12", &["Seated DB Press", "Machine Shoulder Press", "Landmine Press"]),
        ex("Cable Fly", "12-15", &["Pec Deck", "DB Fly (light)", "Push-Up Plus"]),
        ex("Tricep Dips (assisted)", "8-12", &["Bench Dips", "Cable Pushdown", "Close-Grip Push-Ups"]),
    ],
];

const PULL: &[&[Template]] = &[
    &[
        ex("Lat Pulldown", "8-12", &["Assisted Pull-Ups", "Band Pull-Downs", "High Row Machine"]),
        ex("Seated Cable Row", "8-12", &["Chest-Supported Row", "Dumbbell Row", "Machine Row"]),
        ex("Face Pull", "12-15", &["Rear Delt Fly", "Band Face Pull", "Reverse Pec Deck"]),
        ex("Dumbbell Curl", "10-12", &["Cable Curl", "EZ-Bar Curl", "Hammer Curl"]),
    ],
    &[
        ex("Assisted Pull-Ups", "6-10", &["Lat Pulldown", "Band-Assisted Pull-Ups", "High Row Machine"]),
        ex("Chest-Supported Row", "8-12", &["Seated Row", "Dumbbell Row", "Machine Row"]),
        ex("Reverse Pec Deck", "12-15", &["Rear Delt Fly", "Face Pull", "Band Pull-Aparts"]),
        ex("Hammer Curl", "10-12", &["Incline DB Curl", "Cable Curl", "EZ-Bar Curl"]),
    ],
    &[
        ex("High Row Machine", "8-12", &["Lat Pulldown", "Assisted Pull-Ups", "Band Pull-Downs"]),
        ex("One-Arm Dumbbell Row", "8-12", &["Seated Row", "Machine Row", "Chest-Supported Row"]),
        ex("Rear Delt Fly", "12-15", &["Face Pull", "Reverse Pec Deck", "Band Pull-Aparts"]),
        ex("Cable Curl", "10-12", &["DB Curl", "EZ-Bar Curl", "Hammer Curl"]),
    ],
];

const LEGS: &[&[Template]] = &[
    &[
        ex("Leg Press", "8-12", &["Goblet Squat", "Hack Squat Machine", "Smith Squat (light)"]),
        ex("Goblet Squat", "8-12", &["Leg Press", "Smith Squat", "Bodyweight Squat (slow)"]),
        ex("Hamstring Curl", "10-12", &["Romanian Deadlift (light)", "Glute Bridge", "Swiss Ball Curl"]),
        ex("Standing Calf Raise", "12-15", &["Seated Calf Raise", "Leg Press Calf Press", "Single-Leg Calf Raise"]),
    ],
    &[
        ex("Hack Squat Machine", "6-10", &["Leg Press", "Goblet Squat", "Smith Squat"]),
        ex("Romanian Deadlift (DB)", "8-12", &["Hamstring Curl", "Good Morning (light)", "Hip Hinge with KB"]),
        ex("Walking Lunges", "10-12", &["Split Squat", "Step-Ups", "Leg Press (higher reps)"]),
        ex("Seated Calf Raise", "12-15", &["Standing Calf Raise", "Single-Leg Calf Raise", "Leg Press Calf Press"]),
    ],
    &[
        ex("Smith Squat (light)", "8-12", &["Leg Press", "Goblet Squat", "Hack Squat"]),
        ex("Leg Extension", "10-12", &["Split Squat", "Step-Ups", "Goblet Squat (slow)"]),
        ex("Hamstring Curl", "10-12", &["RDL (DB)", "Glute Bridge", "Swiss Ball Curl"]),
        ex("Calf Raises (any)", "12-15", &["Standing Calf Raise", "Seated Calf Raise", "Single-Leg Calf Raise"]),
    ],
];

const UPPER: &[&[Template]] = &[
    &[
        ex("Chest Press", "8-12", &["Bench Press", "DB Bench Press", "Push-Ups"]),
        ex("Lat Pulldown", "8-12", &["Assisted Pull-Ups", "High Row Machine", "Band Pull-Downs"]),
        ex("Seated Dumbbell Shoulder Press", "8-12", &["Machine Shoulder Press", "Arnold Press", "Landmine Press"]),
        ex("Seated Cable Row", "8-12", &["Chest-Supported Row", "Machine Row", "DB Row"]),
    ],
    &[
        ex("Dumbbell Bench Press", "8-12", &["Chest Press Machine", "Bench Press", "Push-Ups"]),
        ex("High Row Machine", "8-12", &["Lat Pulldown", "Assisted Pull-Ups", "Band Pull-Downs"]),
        ex("Lateral Raises", "12-15", &["Cable Lateral Raise", "Machine Lateral Raise", "Lean-Away DB Raise"]),
        ex("Chest-Supported Row", "8-12", &["Seated Row", "Machine Row", "DB Row"]),
    ],
];

const LOWER: &[&[Template]] = &[
    &[
        ex("Leg Press", "8-12", &["Goblet Squat", "Hack Squat", "Smith Squat (light)"]),
        ex("Hamstring Curl", "10-12", &["RDL (DB)", "Glute Bridge", "Swiss Ball Curl"]),
        ex("Split Squat", "8-12", &["Lunges", "Step-Ups", "Leg Press (higher reps)"]),
        ex("Calf Raise", "12-15", &["Seated Calf Raise", "Standing Calf Raise", "Single-Leg Calf Raise"]),
    ],
    &[
        ex("Hack Squat Machine", "6-10", &["Leg Press", "Goblet Squat", "Smith Squat"]),
        ex("Romanian Deadlift (DB)", "8-12", &["Hamstring Curl", "Hip Hinge (KB)", "Glute Bridge"]),
        ex("Leg Extension", "10-12", &["Step-Ups", "Split Squat", "Goblet Squat (slow)"]),
        ex("Seated Calf Raise", "12-15", &["Standing Calf Raise", "Single-Leg Calf Raise", "Leg Press Calf Press"]),
    ],
];

const ARMS: &[&[Template]] = &[
    &[
        ex("EZ-Bar Curl", "8-12", &["DB Curl", "Cable Curl", "Hammer Curl"]),
        ex("Hammer Curl", "10-12", &["Incline DB Curl", "Cable Curl", "DB Curl"]),
        ex("Cable Tricep Pushdown", "10-12", &["Rope Pushdown", "Dips (assisted)", "Close-Grip Push-Ups"]),
        ex("Overhead Tricep Extension", "10-12", &["Cable OH Extension", "Skull Crushers", "Tricep Pushdown"]),
    ],
    &[
        ex("Incline Dumbbell Curl", "10-12", &["DB Curl", "Cable Curl", "EZ-Bar Curl"]),
        ex("Cable Curl", "10-12", &["DB Curl", "EZ-Bar Curl", "Hammer Curl"]),
        ex("Skull Crushers (light)", "8-12", &["Overhead Extension", "Cable Pushdown", "Close-Grip Push-Ups"]),
        ex("Rope Pushdown", "10-12", &["Cable Pushdown", "Dips (assisted)", "Overhead Extension"]),
    ],
];

const FULL: &[&[Template]] = &[
    &[
        ex("Chest Press", "8-12", &["DB Bench Press", "Bench Press", "Push-Ups"]),
        ex("Lat Pulldown", "8-12", &["Assisted Pull-Ups", "High Row Machine", "Band Pull-Downs"]),
        ex("Leg Press", "8-12", &["Goblet Squat", "Hack Squat", "Smith Squat (light)"]),
        ex("Plank", "30-60", &["Dead Bug", "Pallof Press", "Side Plank"]),
    ],
    &[
        ex("Dumbbell Bench Press", "8-12", &["Chest Press Machine", "Bench Press", "Push-Ups"]),
        ex("Seated Cable Row", "8-12", &["Chest-Supported Row", "Machine Row", "DB Row"]),
        ex("Goblet Squat", "8-12", &["Leg Press", "Smith Squat", "Bodyweight Squat"]),
        ex("Dead Bug", "10-12", &["Plank", "Pallof Press", "Bird Dog"]),
    ],
];
