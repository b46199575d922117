//! Tracker - the engine behind every user action
//!
//! Each operation loads what it needs from the store, runs to completion and
//! writes the result back before returning.

use std::fmt;

use chrono::Utc;
use tracing::info;

use crate::chat::{self, ChatMessage, ChatMode, ChatRole};
use crate::db::KeyValueStore;
use crate::error::{ImportError, SaveError};
use crate::export::{EXPORT_VERSION, ExportDocument, ImportDocument};
use crate::history::{History, LoggedExercise, WorkoutRecord};
use crate::library::Library;
use crate::records::{Improvement, PersonalRecords, ResultEntry};
use crate::rest::RestGuide;
use crate::rotation::RotationState;
use crate::session::{Session, SessionGenerator, SessionRequest, new_id};
use crate::split::{Split, cycle_for};
use crate::store::Store;

/// What the next generated session will be, without advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationHint {
    pub split: Split,
    pub variations: usize,
}

impl fmt::Display for RotationHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Next in rotation: {} (has {} workout variations)",
            self.split, self.variations
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub record: WorkoutRecord,
    pub improvements: Vec<Improvement>,
}

pub struct Tracker<S> {
    store: Store<S>,
    library: Library,
    guide: RestGuide,
    chat_mode: ChatMode,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn new(backend: S, library: Library) -> Self {
        Self {
            store: Store::new(backend),
            library,
            guide: RestGuide::default(),
            chat_mode: ChatMode::default(),
        }
    }

    pub fn with_chat_mode(mut self, mode: ChatMode) -> Self {
        self.chat_mode = mode;
        self
    }

    pub fn chat_mode(&self) -> ChatMode {
        self.chat_mode
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn guide(&self) -> &RestGuide {
        &self.guide
    }

    pub fn rotation(&self) -> RotationState {
        self.store.rotation()
    }

    pub fn rotation_hint(&self, days: u32) -> RotationHint {
        let split = self
            .store
            .rotation()
            .peek_split(cycle_for(days))
            .unwrap_or(Split::Full);
        RotationHint {
            split,
            variations: self.library.variation_count(split),
        }
    }

    /// Generate the next session. Rotation is committed here, not on save.
    pub fn generate(&mut self, request: &SessionRequest) -> Session {
        let mut state = self.store.rotation();
        let session = SessionGenerator::new(&self.library, &self.guide).generate(&mut state, request);
        self.store.set_rotation(&state);
        self.store.set_pending_session(Some(&session));

        info!(
            "Generated {} variation {} ({} sets), day index now {}",
            session.split,
            session.variation_index + 1,
            session.sets_per_exercise,
            state.day_index
        );
        session
    }

    pub fn pending_session(&self) -> Option<Session> {
        self.store.pending_session()
    }

    /// Drop the pending session without saving; rotation stays advanced
    pub fn discard_session(&mut self) -> bool {
        let had_session = self.store.pending_session().is_some();
        self.store.set_pending_session(None);
        had_session
    }

    /// Save results for the pending session, `entries` by exercise position.
    ///
    /// Nothing is written when there is no session or no value was entered.
    pub fn save(&mut self, entries: &[ResultEntry]) -> Result<SaveOutcome, SaveError> {
        let session = self
            .store
            .pending_session()
            .filter(|s| !s.exercises.is_empty())
            .ok_or(SaveError::NoSession)?;

        let exercises: Vec<LoggedExercise> = session
            .exercises
            .iter()
            .enumerate()
            .map(|(i, planned)| {
                let entry = entries.get(i).copied().unwrap_or_default();
                LoggedExercise {
                    name: planned.name.clone(),
                    rep_range: planned.rep_range.clone(),
                    weight: entry.weight,
                    reps: entry.reps,
                    sets: session.sets_per_exercise,
                }
            })
            .collect();

        let now = Utc::now();
        let mut prs = self.store.prs();
        let improvements = prs.apply_results(&exercises, now)?;

        let record = WorkoutRecord {
            id: session.id,
            created_at: now,
            split: session.split,
            variation_index: session.variation_index,
            sets_per_exercise: session.sets_per_exercise,
            exercises,
        };

        let mut history = self.store.history();
        history.append(record.clone());
        self.store.set_history(&history);
        self.store.set_prs(&prs);
        self.store.set_pending_session(None);

        info!("Saved workout {} with {} new PRs", record.id, improvements.len());
        Ok(SaveOutcome { record, improvements })
    }

    pub fn history(&self) -> History {
        self.store.history()
    }

    /// Remove a saved workout. PRs are not recalculated.
    pub fn delete_workout(&mut self, id: &str) -> usize {
        let mut history = self.store.history();
        let removed = history.delete(id);
        if removed > 0 {
            self.store.set_history(&history);
            info!("Deleted workout {}", id);
        }
        removed
    }

    pub fn prs(&self) -> PersonalRecords {
        self.store.prs()
    }

    /// Back to the first split; per-split variation counters are kept
    pub fn reset_rotation(&mut self) {
        let mut state = self.store.rotation();
        state.reset_day();
        self.store.set_day_index(state.day_index);
        info!("Rotation reset");
    }

    /// Wipe rotation, variations, history, PRs, chat and the pending session
    pub fn clear_all(&mut self) {
        self.store.clear_all();
        info!("All data cleared");
    }

    pub fn chat_log(&self) -> Vec<ChatMessage> {
        self.store.chat()
    }

    /// Log the question and the coach's answer; blank input is ignored
    pub fn chat(&mut self, question: &str) -> Option<ChatMessage> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }

        let mut log = self.store.chat();
        log.push(ChatMessage {
            id: new_id(),
            at: Utc::now(),
            role: ChatRole::User,
            text: question.to_string(),
        });
        let answer = ChatMessage {
            id: new_id(),
            at: Utc::now(),
            role: ChatRole::Bot,
            text: chat::reply(self.chat_mode, question),
        };
        log.push(answer.clone());
        self.store.set_chat(&log);
        Some(answer)
    }

    pub fn export(&self) -> ExportDocument {
        ExportDocument {
            version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            day_index: self.store.day_index(),
            split_var_index: self.store.variation_indices(),
            history: self.store.history(),
            prs: self.store.prs(),
            chat: self.store.chat(),
        }
    }

    /// Apply an export document. Parse failures change nothing; fields that
    /// are missing or mistyped keep their current value.
    pub fn import_json(&mut self, text: &str) -> Result<Vec<&'static str>, ImportError> {
        let doc = ImportDocument::parse(text)?;
        let applied = doc.present_fields();

        if let Some(day_index) = doc.day_index {
            self.store.set_day_index(day_index);
        }
        if let Some(indices) = &doc.split_var_index {
            self.store.set_variation_indices(indices);
        }
        if let Some(history) = &doc.history {
            self.store.set_history(history);
        }
        if let Some(prs) = &doc.prs {
            self.store.set_prs(prs);
        }
        if let Some(chat) = &doc.chat {
            self.store.set_chat(chat);
        }

        info!("Imported fields: {}", applied.join(", "));
        Ok(applied)
    }
}
