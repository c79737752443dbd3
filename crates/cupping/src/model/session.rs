use super::entry::{CoffeeEntry, EntryId};
use chrono::{DateTime, Local, Utc};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SESSION_NAME: &str = "Nouvelle Session";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct SessionId(String);

crate::impl_id_newtype!(SessionId);

/// Local calendar date of a millisecond timestamp, `YYYY-MM-DD`.
pub fn date_string(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// A tasting session. `coffees` is never empty.
///
/// Deserialization goes through [`crate::persist::SessionRecord`], which
/// back-fills fields that older blobs lack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "crate::persist::SessionRecord")]
pub struct Session {
    pub(crate) schema_version: u32,
    pub(crate) id: SessionId,
    pub(crate) created_at: i64,
    pub(crate) name: String,
    pub(crate) location: String,
    pub(crate) date_string: String,
    pub(crate) origin_notes: String,
    pub(crate) roaster_notes: String,
    pub(crate) importer_notes: String,
    pub(crate) coffees: Vec<CoffeeEntry>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        let created_at = Utc::now().timestamp_millis();
        Self {
            schema_version: SCHEMA_VERSION,
            id: SessionId::generate(),
            created_at,
            name: DEFAULT_SESSION_NAME.to_string(),
            location: String::new(),
            date_string: date_string(created_at),
            origin_notes: String::new(),
            roaster_notes: String::new(),
            importer_notes: String::new(),
            coffees: vec![CoffeeEntry::default()],
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn schema_version(&self) -> u32 {
        self.schema_version
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn date_string(&self) -> &str {
        &self.date_string
    }

    pub fn origin_notes(&self) -> &str {
        &self.origin_notes
    }

    pub fn roaster_notes(&self) -> &str {
        &self.roaster_notes
    }

    pub fn importer_notes(&self) -> &str {
        &self.importer_notes
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn set_date_string(&mut self, date: impl Into<String>) {
        self.date_string = date.into();
    }

    pub fn set_origin_notes(&mut self, notes: impl Into<String>) {
        self.origin_notes = notes.into();
    }

    pub fn set_roaster_notes(&mut self, notes: impl Into<String>) {
        self.roaster_notes = notes.into();
    }

    pub fn set_importer_notes(&mut self, notes: impl Into<String>) {
        self.importer_notes = notes.into();
    }

    pub fn coffees(&self) -> &[CoffeeEntry] {
        &self.coffees
    }

    pub fn position(&self, id: &EntryId) -> Option<usize> {
        self.coffees.iter().position(|c| c.id() == id)
    }

    pub fn coffee(&self, id: &EntryId) -> Option<&CoffeeEntry> {
        self.coffees.iter().find(|c| c.id() == id)
    }

    pub fn coffee_mut(&mut self, id: &EntryId) -> Option<&mut CoffeeEntry> {
        self.coffees.iter_mut().find(|c| c.id() == id)
    }

    /// Appends a fresh entry named after its position and returns its id.
    pub fn add_coffee(&mut self) -> EntryId {
        let entry = CoffeeEntry::new(format!("Café {}", self.coffees.len() + 1));
        let id = entry.id().clone();
        self.coffees.push(entry);
        id
    }

    /// Removes an entry, locked or not. Refuses to remove the last one.
    pub fn delete_coffee(&mut self, id: &EntryId) -> bool {
        if self.coffees.len() <= 1 {
            log::debug!("Refusing to delete the only coffee of session {}", self.id);
            return false;
        }
        match self.position(id) {
            Some(idx) => {
                self.coffees.remove(idx);
                true
            }
            None => false,
        }
    }
}
