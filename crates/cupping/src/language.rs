use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::collections::HashMap;
use std::sync::OnceLock;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Source language: descriptor keys are French terms.
    #[default]
    #[strum(to_string = "fr", serialize = "French", serialize = "Français")]
    Fr,
    #[strum(to_string = "en", serialize = "English")]
    En,
    #[strum(to_string = "es", serialize = "Spanish", serialize = "Español")]
    Es,
}

/// Maps a descriptor or category key to its label in a given language.
/// Implementations fall back to the key when no translation exists.
pub trait Translate {
    fn translate<'a>(&'a self, key: &'a str, language: Language) -> &'a str;
}

/// Labels shipped with the application for the builtin taxonomy.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinLabels;

impl Translate for BuiltinLabels {
    fn translate<'a>(&'a self, key: &'a str, language: Language) -> &'a str {
        let column = match language {
            Language::Fr => return key,
            Language::En => 0,
            Language::Es => 1,
        };
        label_table()
            .get(key)
            .map(|labels| labels[column])
            .unwrap_or(key)
    }
}

fn label_table() -> &'static HashMap<&'static str, [&'static str; 2]> {
    static TABLE: OnceLock<HashMap<&'static str, [&'static str; 2]>> = OnceLock::new();
    TABLE.get_or_init(|| {
        LABELS
            .iter()
            .map(|(key, en, es)| (*key, [*en, *es]))
            .collect()
    })
}

/// `(key, en, es)`
const LABELS: &[(&str, &str, &str)] = &[
    // categories
    ("Fruité", "Fruity", "Frutal"),
    ("Floral", "Floral", "Floral"),
    ("Épicé", "Spicy", "Especiado"),
    ("Chocolat / Noix", "Nutty / Cocoa", "Frutos Secos / Cacao"),
    ("Caramélisé", "Sweet", "Dulce"),
    ("Céréales / Pain", "Roasted", "Tostado"),
    // fruity
    ("Citron", "Lemon", "Limón"),
    ("Orange", "Orange", "Naranja"),
    ("Pamplemousse", "Grapefruit", "Pomelo"),
    ("Cerise", "Cherry", "Cereza"),
    ("Fraise", "Strawberry", "Fresa"),
    ("Framboise", "Raspberry", "Frambuesa"),
    ("Myrtille", "Blueberry", "Arándano"),
    ("Raisin", "Grape", "Uva"),
    ("Ananas", "Pineapple", "Piña"),
    ("Mangue", "Mango", "Mango"),
    ("Passion", "Passion Fruit", "Maracuyá"),
    ("Pêche", "Peach", "Melocotón"),
    ("Pomme verte", "Green Apple", "Manzana Verde"),
    ("Poire", "Pear", "Pera"),
    // floral
    ("Jasmin", "Jasmine", "Jazmín"),
    ("Rose", "Rose", "Rosa"),
    ("Fleur d'oranger", "Orange Blossom", "Azahar"),
    ("Lavande", "Lavender", "Lavanda"),
    ("Hibiscus", "Hibiscus", "Hibisco"),
    ("Violette", "Violet", "Violeta"),
    ("Camomille", "Chamomile", "Manzanilla"),
    // spicy
    ("Cannelle", "Cinnamon", "Canela"),
    ("Clou de girofle", "Clove", "Clavo"),
    ("Muscade", "Nutmeg", "Nuez Moscada"),
    ("Poivre", "Pepper", "Pimienta"),
    ("Cardamome", "Cardamom", "Cardamomo"),
    ("Gingembre", "Ginger", "Jengibre"),
    // nutty
    ("Chocolat noir", "Dark Chocolate", "Choc. Negro"),
    ("Chocolat au lait", "Milk Chocolate", "Choc. con Leche"),
    ("Cacao", "Cocoa", "Cacao"),
    ("Noisette", "Hazelnut", "Avellana"),
    ("Amande", "Almond", "Almendra"),
    ("Noix", "Walnut", "Nuez"),
    ("Cacahuète", "Peanut", "Cacahuete"),
    // sweet
    ("Caramel", "Caramel", "Caramelo"),
    ("Miel", "Honey", "Miel"),
    ("Cassonade", "Brown Sugar", "Azúcar Moreno"),
    ("Sirop d'érable", "Maple Syrup", "Jarabe de Arce"),
    ("Mélasse", "Molasses", "Melaza"),
    // cereal
    ("Pain grillé", "Toast", "Pan Tostado"),
    ("Biscuit", "Biscuit", "Galleta"),
    ("Céréales", "Cereal", "Cereal"),
    ("Malt", "Malt", "Malta"),
    ("Noisette grillée", "Roasted Hazelnut", "Avellana Tostada"),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Taxonomy;

    #[test]
    fn test_language_deserialization() {
        let cases = vec![
            ("\"fr\"", Language::Fr),
            ("\"FR\"", Language::Fr),
            ("\"French\"", Language::Fr),
            ("\"en\"", Language::En),
            ("\"english\"", Language::En),
            ("\"Es\"", Language::Es),
        ];

        for (json, expected) in cases {
            let deserialized: Language = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_language_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
    }

    #[test]
    fn test_translate() {
        let labels = BuiltinLabels;
        assert_eq!(labels.translate("Citron", Language::Fr), "Citron");
        assert_eq!(labels.translate("Citron", Language::En), "Lemon");
        assert_eq!(labels.translate("Citron", Language::Es), "Limón");
        assert_eq!(labels.translate("Caramélisé", Language::En), "Sweet");
    }

    #[test]
    fn test_translate_falls_back_to_key() {
        assert_eq!(BuiltinLabels.translate("Tabac", Language::En), "Tabac");
    }

    #[test]
    fn test_every_builtin_key_has_labels() {
        let taxonomy = Taxonomy::builtin();
        for (category, key) in taxonomy.descriptors() {
            assert!(label_table().contains_key(key.as_str()), "{key}");
            assert!(label_table().contains_key(category.display_key.as_str()));
        }
    }
}
