use super::score::Score;
use crate::taxonomy::DescriptorKey;
use chrono::Utc;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

pub const DEFAULT_COFFEE_NAME: &str = "Nouveau Café";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct EntryId(String);

crate::impl_id_newtype!(EntryId);

/// Which of the two descriptor sets of an entry a note goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum NoteKind {
    #[strum(to_string = "fragrance", serialize = "aroma", serialize = "olfactory")]
    Fragrance,
    #[strum(to_string = "flavor", serialize = "taste", serialize = "mouth")]
    Flavor,
}

/// Insertion-ordered set of descriptor keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteSet(Vec<DescriptorKey>);

impl NoteSet {
    pub fn contains(&self, key: &DescriptorKey) -> bool {
        self.0.contains(key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DescriptorKey> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Adds `key` if absent, removes it if present. Returns whether it is now selected.
    pub(crate) fn toggle(&mut self, key: DescriptorKey) -> bool {
        match self.0.iter().position(|k| *k == key) {
            Some(idx) => {
                self.0.remove(idx);
                false
            }
            None => {
                self.0.push(key);
                true
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

impl<'a> IntoIterator for &'a NoteSet {
    type Item = &'a DescriptorKey;
    type IntoIter = std::slice::Iter<'a, DescriptorKey>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One scored coffee. Fields are only reachable for writing through the
/// lock-gated methods in [`super::lock`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoffeeEntry {
    pub(crate) id: EntryId,
    pub(crate) name: String,
    pub(crate) is_locked: bool,
    pub(crate) is_favorite: bool,
    pub(crate) timestamp: i64,

    pub(crate) process: String,

    pub(crate) fragrance_score: Score,
    pub(crate) fragrance_notes: NoteSet,

    pub(crate) flavor_score: Score,
    pub(crate) flavor_notes: NoteSet,

    pub(crate) aftertaste_score: Score,

    pub(crate) acidity_score: Score,
    pub(crate) acidity_type: String,
    pub(crate) acidity_intensity: String,

    pub(crate) body_score: Score,
    pub(crate) body_type: String,

    pub(crate) balance_score: Score,

    pub(crate) comments: String,
}

impl Default for CoffeeEntry {
    fn default() -> Self {
        Self::new(DEFAULT_COFFEE_NAME)
    }
}

impl CoffeeEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntryId::generate(),
            name: name.into(),
            is_locked: false,
            is_favorite: false,
            timestamp: Utc::now().timestamp_millis(),
            process: String::new(),
            fragrance_score: Score::DEFAULT,
            fragrance_notes: NoteSet::default(),
            flavor_score: Score::DEFAULT,
            flavor_notes: NoteSet::default(),
            aftertaste_score: Score::DEFAULT,
            acidity_score: Score::DEFAULT,
            acidity_type: String::new(),
            acidity_intensity: String::new(),
            body_score: Score::DEFAULT,
            body_type: String::new(),
            balance_score: Score::DEFAULT,
            comments: String::new(),
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_locked(&self) -> bool {
        self.is_locked
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// Creation time, milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn process(&self) -> &str {
        &self.process
    }

    pub fn notes(&self, kind: NoteKind) -> &NoteSet {
        match kind {
            NoteKind::Fragrance => &self.fragrance_notes,
            NoteKind::Flavor => &self.flavor_notes,
        }
    }

    pub fn fragrance_notes(&self) -> &NoteSet {
        &self.fragrance_notes
    }

    pub fn flavor_notes(&self) -> &NoteSet {
        &self.flavor_notes
    }

    pub fn acidity_type(&self) -> &str {
        &self.acidity_type
    }

    pub fn acidity_intensity(&self) -> &str {
        &self.acidity_intensity
    }

    pub fn body_type(&self) -> &str {
        &self.body_type
    }

    pub fn comments(&self) -> &str {
        &self.comments
    }

    pub(crate) fn notes_mut(&mut self, kind: NoteKind) -> &mut NoteSet {
        match kind {
            NoteKind::Fragrance => &mut self.fragrance_notes,
            NoteKind::Flavor => &mut self.flavor_notes,
        }
    }
}
