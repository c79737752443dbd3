pub mod entry;
pub mod lock;
pub mod score;
pub mod session;

pub use entry::{CoffeeEntry, DEFAULT_COFFEE_NAME, EntryId, NoteKind, NoteSet};
pub use lock::LockState;
pub use score::{Attribute, Score, ScoreError, format_score};
pub use session::{DEFAULT_SESSION_NAME, SCHEMA_VERSION, Session, SessionId, date_string};

pub const PROCESSING_METHODS: &[&str] = &["Nature", "Honey", "Lavé", "Anaérobie", "Co-Fermenté"];
pub const ACIDITY_TYPES: &[&str] = &["Citrique", "Malique", "Tartrique", "Acétique"];
pub const ACIDITY_INTENSITIES: &[&str] = &["Faible", "Moyenne", "Forte"];
pub const BODY_TYPES: &[&str] = &[
    "Aqueux", "Léger", "Moyen", "Rond", "Crémeux", "Sirupeux", "Velouté", "Charnu",
];
