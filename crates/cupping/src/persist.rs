use crate::model::{
    CoffeeEntry, DEFAULT_SESSION_NAME, SCHEMA_VERSION, Session, SessionId, date_string,
};
use crate::taxonomy::Taxonomy;
use chrono::Utc;
use fs_err as fs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed session data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tolerant on-disk shape of a session: anything may be missing. Older blobs
/// lack `schemaVersion` and some note fields; the gaps are filled and present
/// values are kept as they are.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionRecord {
    schema_version: Option<u32>,
    id: Option<SessionId>,
    created_at: Option<i64>,
    name: Option<String>,
    location: Option<String>,
    date_string: Option<String>,
    origin_notes: Option<String>,
    roaster_notes: Option<String>,
    importer_notes: Option<String>,
    coffees: Vec<CoffeeEntry>,
}

impl From<SessionRecord> for Session {
    fn from(record: SessionRecord) -> Self {
        let version = record.schema_version.unwrap_or(0);
        if version < SCHEMA_VERSION {
            log::info!(
                "Upgrading session blob from schema v{} to v{}",
                version,
                SCHEMA_VERSION
            );
        } else if version > SCHEMA_VERSION {
            log::warn!(
                "Session blob has newer schema v{} (this build knows v{})",
                version,
                SCHEMA_VERSION
            );
        }

        let created_at = record
            .created_at
            .unwrap_or_else(|| Utc::now().timestamp_millis());

        let mut coffees = record.coffees;
        if coffees.is_empty() {
            log::warn!("Session blob has no coffees; adding a default entry");
            coffees.push(CoffeeEntry::default());
        }

        Session {
            schema_version: SCHEMA_VERSION,
            id: record.id.unwrap_or_else(SessionId::generate),
            created_at,
            name: record
                .name
                .unwrap_or_else(|| DEFAULT_SESSION_NAME.to_string()),
            location: record.location.unwrap_or_default(),
            date_string: record
                .date_string
                .unwrap_or_else(|| date_string(created_at)),
            origin_notes: record.origin_notes.unwrap_or_default(),
            roaster_notes: record.roaster_notes.unwrap_or_default(),
            importer_notes: record.importer_notes.unwrap_or_default(),
            coffees,
        }
    }
}

pub fn decode(json: &str) -> Result<Session, PersistError> {
    Ok(serde_json::from_str(json)?)
}

pub fn encode(session: &Session) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(session)?)
}

/// Logs descriptor keys the taxonomy does not know. Returns how many there were.
pub fn warn_unknown_descriptors(session: &Session, taxonomy: &Taxonomy) -> usize {
    let unknown = taxonomy.unknown_descriptors(session);
    for key in &unknown {
        log::warn!("Session {} references unknown descriptor '{}'", session.id(), key);
    }
    unknown.len()
}

/// Destination of committed sessions.
pub trait SessionSink {
    fn save(&mut self, session: &Session) -> Result<(), PersistError>;
}

/// A session stored as a JSON file.
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when the file does not exist yet.
    pub fn load(&self) -> Result<Option<Session>, PersistError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => decode(&json).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads the stored session, falling back to a fresh one when the file is
    /// missing or unreadable.
    pub fn load_or_new(&self) -> Session {
        match self.load() {
            Ok(Some(session)) => session,
            Ok(None) => {
                log::info!("No session at {}, starting a new one", self.path.display());
                Session::new()
            }
            Err(e) => {
                log::warn!(
                    "Failed to load session from {}: {}. Starting a new one",
                    self.path.display(),
                    e
                );
                Session::new()
            }
        }
    }
}

impl SessionSink for SessionFile {
    fn save(&mut self, session: &Session) -> Result<(), PersistError> {
        write_json(session, &self.path)
    }
}

/// Reads a session the user picked explicitly. Unlike [`SessionFile::load_or_new`],
/// a bad file is an error.
pub fn import_json(path: &Path) -> Result<Session, PersistError> {
    decode(&fs::read_to_string(path)?)
}

pub fn export_json(session: &Session, path: &Path) -> Result<(), PersistError> {
    write_json(session, path)
}

fn write_json(session: &Session, path: &Path) -> Result<(), PersistError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, encode(session)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
