//! Session generation: split schedule + rotation + library → today's workout

use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::library::{ExerciseTemplate, Library};
use crate::rest::{RestAdvice, RestGuide};
use crate::rotation::RotationState;
use crate::split::{Split, cycle_for};

pub const DAYS_RANGE: std::ops::RangeInclusive<u32> = 1..=6;
pub const MINUTES_RANGE: std::ops::RangeInclusive<u32> = 20..=180;
pub const SETS_RANGE: std::ops::RangeInclusive<u32> = 1..=6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetsMode {
    /// Derived from the session length
    Auto,
    Custom(u32),
}

/// Sets per exercise that fit into a session of `minutes`
pub fn sets_for_time(minutes: u32) -> u32 {
    if minutes <= 30 {
        2
    } else if minutes <= 45 {
        3
    } else {
        4
    }
}

/// A validated request for a new session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRequest {
    pub days: u32,
    pub sets_per_exercise: u32,
}

impl SessionRequest {
    pub fn new(days: u32, minutes: u32, mode: SetsMode) -> Result<Self, ValidationError> {
        if !DAYS_RANGE.contains(&days) {
            return Err(ValidationError::DaysOutOfRange(days));
        }
        if !MINUTES_RANGE.contains(&minutes) {
            return Err(ValidationError::TimeOutOfRange(minutes));
        }
        let sets_per_exercise = match mode {
            SetsMode::Auto => sets_for_time(minutes),
            SetsMode::Custom(sets) if SETS_RANGE.contains(&sets) => sets,
            SetsMode::Custom(sets) => return Err(ValidationError::SetsOutOfRange(sets)),
        };
        Ok(Self { days, sets_per_exercise })
    }
}

/// Exercise as presented for today's session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedExercise {
    pub name: String,
    pub rep_range: String,
    pub alternatives: Vec<String>,
    pub rest: RestAdvice,
    pub sets: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub split: Split,
    pub variation_index: usize,
    pub sets_per_exercise: u32,
    pub exercises: Vec<PlannedExercise>,
}

pub struct SessionGenerator<'a> {
    library: &'a Library,
    guide: &'a RestGuide,
}

impl<'a> SessionGenerator<'a> {
    pub fn new(library: &'a Library, guide: &'a RestGuide) -> Self {
        Self { library, guide }
    }

    /// Build the next session and advance the rotation.
    ///
    /// The counters move on every call, whether or not the session is
    /// saved later.
    pub fn generate(&self, state: &mut RotationState, request: &SessionRequest) -> Session {
        let cycle = cycle_for(request.days);
        let split = state.advance_day(cycle).unwrap_or(Split::Full);

        let variations = self.library.variations(split);
        let (variation_index, exercises) = match state.advance_variation(split, variations.len()) {
            Some(index) => (index, self.plan(&variations[index].exercises, request.sets_per_exercise)),
            None => (0, Vec::new()),
        };

        Session {
            id: new_id(),
            split,
            variation_index,
            sets_per_exercise: request.sets_per_exercise,
            exercises,
        }
    }

    fn plan(&self, templates: &[ExerciseTemplate], sets: u32) -> Vec<PlannedExercise> {
        templates
            .iter()
            .map(|t| PlannedExercise {
                name: t.name.clone(),
                rep_range: t.rep_range.clone(),
                alternatives: t.alternatives.clone(),
                rest: self.guide.rest_for(&t.rep_range),
                sets,
            })
            .collect()
    }
}

/// Identifier like `w_1718000000000_9f3a1c2b`
pub fn new_id() -> String {
    let suffix: u64 = rand::thread_rng().r#gen();
    format!("w_{}_{:x}", Utc::now().timestamp_millis(), suffix)
}
