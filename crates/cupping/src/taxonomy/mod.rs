mod builtin;

use crate::model::Session;
use derive_more::{AsRef, Deref, Display};
use palette::Srgb;
use palette::rgb::FromHexError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;

pub use builtin::{CATEGORIES, COLOR_OVERRIDES};

/// Sector and tag colors are plain 8-bit sRGB.
pub type Color = Srgb<u8>;

pub const DARK_TEXT: Color = Srgb::new(0x1E, 0x1B, 0x18);
pub const LIGHT_TEXT: Color = Srgb::new(0xFF, 0xFF, 0xFF);

/// Key of a single aromatic descriptor. Keys are the source-language (French)
/// terms; translated labels are looked up through [`crate::language::Translate`].
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, Deref, AsRef,
)]
#[serde(transparent)]
pub struct DescriptorKey(String);

impl DescriptorKey {
    pub(crate) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, AsRef)]
#[serde(transparent)]
pub struct CategoryId(String);

crate::impl_string_newtype!(CategoryId);

#[derive(Error, Debug, PartialEq)]
pub enum TaxonomyError {
    #[error("Unknown descriptor '{0}'")]
    UnknownDescriptor(String),
    #[error("Descriptor '{key}' appears in both '{first}' and '{second}'")]
    DuplicateDescriptor {
        key: String,
        first: CategoryId,
        second: CategoryId,
    },
    #[error("Color override for unknown descriptor '{0}'")]
    UnknownOverride(String),
    #[error("Invalid color '{value}': {reason}")]
    InvalidColor { value: String, reason: String },
}

pub fn parse_color(hex: &str) -> Result<Color, TaxonomyError> {
    hex.parse::<Color>()
        .map_err(|e: FromHexError| TaxonomyError::InvalidColor {
            value: hex.to_string(),
            reason: e.to_string(),
        })
}

pub fn to_hex(color: Color) -> String {
    format!("#{:02X}{:02X}{:02X}", color.red, color.green, color.blue)
}

/// Picks a readable label color for text drawn on top of `background`.
pub fn contrast_color(background: Color) -> Color {
    let (r, g, b) = (
        background.red as u32,
        background.green as u32,
        background.blue as u32,
    );
    let yiq = (r * 299 + g * 587 + b * 114) / 1000;
    if yiq >= 128 { DARK_TEXT } else { LIGHT_TEXT }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorCategory {
    pub id: CategoryId,
    pub display_key: String,
    pub color: Color,
    pub items: Vec<DescriptorKey>,
}

impl DescriptorCategory {
    pub fn new(
        id: impl Into<String>,
        display_key: impl Into<String>,
        color: &str,
        items: &[&str],
    ) -> Result<Self, TaxonomyError> {
        Ok(Self {
            id: CategoryId::new(id),
            display_key: display_key.into(),
            color: parse_color(color)?,
            items: items.iter().map(|s| DescriptorKey::new(*s)).collect(),
        })
    }
}

/// Ordered category list plus per-item color overrides. Every descriptor key
/// belongs to exactly one category; this is checked on construction.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<DescriptorCategory>,
    overrides: HashMap<DescriptorKey, Color>,
    owners: HashMap<DescriptorKey, usize>,
}

impl Taxonomy {
    pub fn new(
        categories: Vec<DescriptorCategory>,
        overrides: &[(&str, &str)],
    ) -> Result<Self, TaxonomyError> {
        let mut owners = HashMap::new();
        for (idx, category) in categories.iter().enumerate() {
            for key in &category.items {
                if let Some(prev) = owners.insert(key.clone(), idx) {
                    return Err(TaxonomyError::DuplicateDescriptor {
                        key: key.to_string(),
                        first: categories[prev].id.clone(),
                        second: category.id.clone(),
                    });
                }
            }
        }

        let overrides = overrides
            .iter()
            .map(|(key, hex)| {
                let key = DescriptorKey::new(*key);
                if !owners.contains_key(&key) {
                    return Err(TaxonomyError::UnknownOverride(key.to_string()));
                }
                Ok((key, parse_color(hex)?))
            })
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(Self {
            categories,
            overrides,
            owners,
        })
    }

    /// The aroma taxonomy shipped with the application.
    pub fn builtin() -> &'static Taxonomy {
        static BUILTIN: OnceLock<Taxonomy> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let categories = CATEGORIES
                .iter()
                .map(|(id, name, color, items)| DescriptorCategory::new(*id, *name, color, items))
                .collect::<Result<Vec<_>, _>>()
                .and_then(|cats| Taxonomy::new(cats, COLOR_OVERRIDES));
            match categories {
                Ok(taxonomy) => taxonomy,
                Err(e) => panic!("builtin taxonomy is invalid: {e}"),
            }
        })
    }

    pub fn categories(&self) -> &[DescriptorCategory] {
        &self.categories
    }

    pub fn descriptor_count(&self) -> usize {
        self.owners.len()
    }

    /// All descriptors, categories in order then items in order.
    pub fn descriptors(&self) -> impl Iterator<Item = (&DescriptorCategory, &DescriptorKey)> {
        self.categories
            .iter()
            .flat_map(|cat| cat.items.iter().map(move |key| (cat, key)))
    }

    pub fn lookup(&self, key: &str) -> Result<DescriptorKey, TaxonomyError> {
        let key = DescriptorKey::new(key);
        if self.owners.contains_key(&key) {
            Ok(key)
        } else {
            Err(TaxonomyError::UnknownDescriptor(key.0))
        }
    }

    pub fn contains(&self, key: &DescriptorKey) -> bool {
        self.owners.contains_key(key)
    }

    pub fn category_of(&self, key: &DescriptorKey) -> Option<&DescriptorCategory> {
        self.owners.get(key).map(|&idx| &self.categories[idx])
    }

    /// Item-level override wins over the category color.
    pub fn color_of(&self, key: &DescriptorKey) -> Option<Color> {
        self.overrides
            .get(key)
            .copied()
            .or_else(|| self.category_of(key).map(|c| c.color))
    }

    pub fn override_for(&self, key: &DescriptorKey) -> Option<Color> {
        self.overrides.get(key).copied()
    }

    /// Descriptor keys referenced by `session` that this taxonomy does not know.
    pub fn unknown_descriptors<'a>(&self, session: &'a Session) -> Vec<&'a DescriptorKey> {
        let mut unknown: Vec<_> = session
            .coffees()
            .iter()
            .flat_map(|c| c.fragrance_notes().iter().chain(c.flavor_notes().iter()))
            .filter(|key| !self.contains(key))
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_counts() {
        let taxonomy = Taxonomy::builtin();
        assert_eq!(taxonomy.categories().len(), 6);
        assert_eq!(taxonomy.descriptor_count(), 44);
        assert_eq!(taxonomy.descriptors().count(), 44);
    }

    #[test]
    fn test_lookup_rejects_unknown_key() {
        let taxonomy = Taxonomy::builtin();
        assert!(taxonomy.lookup("Citron").is_ok());
        assert_eq!(
            taxonomy.lookup("Lemon"),
            Err(TaxonomyError::UnknownDescriptor("Lemon".to_string()))
        );
    }

    #[test]
    fn test_override_wins_over_category_color() {
        let taxonomy = Taxonomy::builtin();
        let citron = taxonomy.lookup("Citron").unwrap();
        assert_eq!(taxonomy.color_of(&citron), Some(Srgb::new(0xF5, 0xE4, 0x52)));
        assert_eq!(taxonomy.category_of(&citron).unwrap().id.as_str(), "fruity");
    }

    #[test]
    fn test_category_color_without_override() {
        let cats = vec![
            DescriptorCategory::new("a", "A", "#102030", &["x", "y"]).unwrap(),
        ];
        let taxonomy = Taxonomy::new(cats, &[("y", "#FFFFFF")]).unwrap();
        let x = taxonomy.lookup("x").unwrap();
        let y = taxonomy.lookup("y").unwrap();
        assert_eq!(taxonomy.color_of(&x), Some(Srgb::new(0x10, 0x20, 0x30)));
        assert_eq!(taxonomy.color_of(&y), Some(Srgb::new(0xFF, 0xFF, 0xFF)));
    }

    #[test]
    fn test_duplicate_descriptor_rejected() {
        let cats = vec![
            DescriptorCategory::new("a", "A", "#000000", &["x"]).unwrap(),
            DescriptorCategory::new("b", "B", "#000000", &["x"]).unwrap(),
        ];
        assert!(matches!(
            Taxonomy::new(cats, &[]),
            Err(TaxonomyError::DuplicateDescriptor { .. })
        ));
    }

    #[test]
    fn test_override_for_unknown_key_rejected() {
        let cats = vec![DescriptorCategory::new("a", "A", "#000000", &["x"]).unwrap()];
        assert_eq!(
            Taxonomy::new(cats, &[("nope", "#000000")]).unwrap_err(),
            TaxonomyError::UnknownOverride("nope".to_string())
        );
    }

    #[test]
    fn test_invalid_color() {
        assert!(matches!(
            DescriptorCategory::new("a", "A", "#GG0000", &[]),
            Err(TaxonomyError::InvalidColor { .. })
        ));
    }

    #[test]
    fn test_contrast_color() {
        let cases = vec![
            ("#F8F8F3", DARK_TEXT),  // Jasmin
            ("#462920", LIGHT_TEXT), // Chocolat noir
            ("#F5E452", DARK_TEXT),  // Citron
            ("#6165A4", LIGHT_TEXT), // Myrtille
        ];
        for (hex, expected) in cases {
            assert_eq!(contrast_color(parse_color(hex).unwrap()), expected, "{hex}");
        }
    }

    #[test]
    fn test_hex_roundtrip() {
        assert_eq!(to_hex(parse_color("#cf3e53").unwrap()), "#CF3E53");
    }
}
