use super::entry::{CoffeeEntry, NoteKind};
use super::score::{Attribute, Score};
use crate::taxonomy::DescriptorKey;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// A locked (validated) entry ignores every write except the favorite toggle.
/// Ignored writes are not errors: each setter reports whether it applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LockState {
    Editable,
    Locked,
}

impl CoffeeEntry {
    pub fn lock_state(&self) -> LockState {
        if self.is_locked {
            LockState::Locked
        } else {
            LockState::Editable
        }
    }

    /// Validate: freeze the entry.
    pub fn lock(&mut self) {
        self.is_locked = true;
    }

    /// Modify: unfreeze the entry. Always permitted.
    pub fn unlock(&mut self) {
        self.is_locked = false;
    }

    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }

    fn guarded(&mut self, what: &str, apply: impl FnOnce(&mut Self)) -> bool {
        if self.is_locked {
            log::debug!("Ignoring {} on locked entry {}", what, self.id);
            return false;
        }
        apply(self);
        true
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        self.guarded("rename", |e| e.name = name)
    }

    pub fn set_process(&mut self, process: impl Into<String>) -> bool {
        let process = process.into();
        self.guarded("process change", |e| e.process = process)
    }

    pub fn set_score(&mut self, attribute: Attribute, score: Score) -> bool {
        self.guarded("score change", |e| *e.score_slot(attribute) = score)
    }

    /// Puts every attribute score back to its default.
    pub fn reset_scores(&mut self) -> bool {
        self.guarded("score reset", |e| {
            for attribute in Attribute::iter() {
                *e.score_slot(attribute) = Score::DEFAULT;
            }
        })
    }

    pub fn toggle_note(&mut self, kind: NoteKind, key: DescriptorKey) -> bool {
        self.guarded("note toggle", |e| {
            e.notes_mut(kind).toggle(key);
        })
    }

    pub fn clear_notes(&mut self, kind: NoteKind) -> bool {
        self.guarded("note clear", |e| e.notes_mut(kind).clear())
    }

    pub fn set_acidity_type(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.guarded("acidity type change", |e| e.acidity_type = value)
    }

    pub fn set_acidity_intensity(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.guarded("acidity intensity change", |e| e.acidity_intensity = value)
    }

    pub fn set_body_type(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.guarded("body type change", |e| e.body_type = value)
    }

    pub fn set_comments(&mut self, comments: impl Into<String>) -> bool {
        let comments = comments.into();
        self.guarded("comment change", |e| e.comments = comments)
    }
}
