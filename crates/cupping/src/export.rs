use crate::language::{Language, Translate};
use crate::model::{Attribute, CoffeeEntry, Session, date_string};
use chrono::Utc;
use serde::Serialize;
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeScore {
    pub attribute: Attribute,
    pub value: f64,
}

/// One coffee, flattened for report writers (CSV, PDF, print).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub name: String,
    pub is_favorite: bool,
    pub process: String,
    pub aggregate_score: f64,
    /// Fragrance then flavor notes, each label once, in first-seen order.
    pub descriptors: Vec<String>,
    pub scores: Vec<AttributeScore>,
    pub comments: String,
}

impl ExportRow {
    pub fn new(entry: &CoffeeEntry, labels: &impl Translate, language: Language) -> Self {
        let mut descriptors: Vec<String> = Vec::new();
        for key in entry.fragrance_notes().iter().chain(entry.flavor_notes()) {
            let label = labels.translate(key, language);
            if !descriptors.iter().any(|d| d == label) {
                descriptors.push(label.to_string());
            }
        }

        Self {
            name: entry.name().to_string(),
            is_favorite: entry.is_favorite(),
            process: entry.process().to_string(),
            aggregate_score: entry.aggregate_score(),
            descriptors,
            scores: Attribute::iter()
                .map(|attribute| AttributeScore {
                    attribute,
                    value: entry.score(attribute).value(),
                })
                .collect(),
            comments: entry.comments().to_string(),
        }
    }
}

/// One row per coffee, in session order.
pub fn rows(session: &Session, labels: &impl Translate, language: Language) -> Vec<ExportRow> {
    session
        .coffees()
        .iter()
        .map(|entry| ExportRow::new(entry, labels, language))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHeader {
    pub name: String,
    pub date: String,
    pub location: String,
    pub origin_notes: String,
    pub roaster_notes: String,
    pub importer_notes: String,
}

impl ReportHeader {
    pub fn new(session: &Session) -> Self {
        let date = if session.date_string().trim().is_empty() {
            date_string(Utc::now().timestamp_millis())
        } else {
            session.date_string().to_string()
        };
        Self {
            name: session.name().to_string(),
            date,
            location: session.location().to_string(),
            origin_notes: session.origin_notes().to_string(),
            roaster_notes: session.roaster_notes().to_string(),
            importer_notes: session.importer_notes().to_string(),
        }
    }
}
