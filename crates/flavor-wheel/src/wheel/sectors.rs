use cupping::language::{Language, Translate};
use cupping::taxonomy::{CategoryId, Color, DescriptorKey, Taxonomy, contrast_color};

/// One descriptor's wedge of the disc. Angles are in degrees, in the disc's
/// own frame, `[start_angle, end_angle)`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatSector {
    pub key: DescriptorKey,
    pub category: CategoryId,
    pub label: String,
    pub category_label: String,
    pub color: Color,
    pub text_color: Color,
    pub start_angle: f64,
    pub end_angle: f64,
    pub mid_angle: f64,
}

impl FlatSector {
    pub fn contains(&self, angle: f64) -> bool {
        self.start_angle <= angle && angle < self.end_angle
    }

    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Every descriptor of a taxonomy laid out around the circle, categories in
/// order, items in order, each item the same width.
#[derive(Debug, Clone)]
pub struct SectorMap {
    sectors: Vec<FlatSector>,
    language: Language,
}

impl SectorMap {
    pub fn build(taxonomy: &Taxonomy, labels: &impl Translate, language: Language) -> Self {
        let n = taxonomy.descriptor_count();
        // i * 360 / n rather than accumulating a step: the last wedge ends at
        // exactly 360 and neighbours share bit-identical boundaries
        let boundary = |i: usize| i as f64 * 360.0 / n as f64;

        let sectors = taxonomy
            .descriptors()
            .enumerate()
            .map(|(i, (category, key))| {
                let color = taxonomy.color_of(key).unwrap_or(category.color);
                let (start_angle, end_angle) = (boundary(i), boundary(i + 1));
                FlatSector {
                    key: key.clone(),
                    category: category.id.clone(),
                    label: labels.translate(key, language).to_string(),
                    category_label: labels.translate(&category.display_key, language).to_string(),
                    color,
                    text_color: contrast_color(color),
                    start_angle,
                    end_angle,
                    mid_angle: (start_angle + end_angle) / 2.0,
                }
            })
            .collect();

        log::debug!("Built {} sectors ({})", n, language);
        Self { sectors, language }
    }

    /// Swaps labels for another language. Angles and order are untouched.
    pub fn relabel(&mut self, taxonomy: &Taxonomy, labels: &impl Translate, language: Language) {
        for sector in &mut self.sectors {
            sector.label = labels.translate(&sector.key, language).to_string();
            if let Some(category) = taxonomy.category_of(&sector.key) {
                sector.category_label =
                    labels.translate(&category.display_key, language).to_string();
            }
        }
        self.language = language;
    }

    pub fn sectors(&self) -> &[FlatSector] {
        &self.sectors
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    /// Width of a single wedge, or 0 for an empty map.
    pub fn angle_per_item(&self) -> f64 {
        if self.sectors.is_empty() {
            0.0
        } else {
            360.0 / self.sectors.len() as f64
        }
    }

    pub fn position(&self, key: &DescriptorKey) -> Option<usize> {
        self.sectors.iter().position(|s| &s.key == key)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use cupping::language::BuiltinLabels;
    use cupping::taxonomy::DescriptorCategory;

    /// `categories` categories of `items` descriptors each, named `c{i}` / `c{i}-{j}`.
    pub(crate) fn uniform_taxonomy(categories: usize, items: usize) -> Taxonomy {
        let cats = (0..categories)
            .map(|c| {
                let keys: Vec<String> = (0..items).map(|i| format!("c{c}-{i}")).collect();
                let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
                DescriptorCategory::new(format!("c{c}"), format!("C{c}"), "#808080", &keys).unwrap()
            })
            .collect();
        Taxonomy::new(cats, &[]).unwrap()
    }

    /// Labels every key `"{key}@{language}"`.
    pub(crate) struct TaggedLabels {
        tagged: std::collections::HashMap<String, [String; 3]>,
    }

    impl TaggedLabels {
        pub(crate) fn for_taxonomy(taxonomy: &Taxonomy) -> Self {
            let mut tagged = std::collections::HashMap::new();
            let keys = taxonomy
                .descriptors()
                .map(|(_, key)| key.to_string())
                .chain(taxonomy.categories().iter().map(|c| c.display_key.clone()));
            for key in keys {
                let labels = [format!("{key}@fr"), format!("{key}@en"), format!("{key}@es")];
                tagged.insert(key, labels);
            }
            Self { tagged }
        }
    }

    impl Translate for TaggedLabels {
        fn translate<'a>(&'a self, key: &'a str, language: Language) -> &'a str {
            let column = match language {
                Language::Fr => 0,
                Language::En => 1,
                Language::Es => 2,
            };
            self.tagged.get(key).map(|l| l[column].as_str()).unwrap_or(key)
        }
    }

    fn assert_partition(map: &SectorMap) {
        let sectors = map.sectors();
        assert_eq!(sectors.first().unwrap().start_angle, 0.0);
        assert_eq!(sectors.last().unwrap().end_angle, 360.0);
        for pair in sectors.windows(2) {
            assert_eq!(pair[0].end_angle, pair[1].start_angle);
            assert!(pair[0].start_angle < pair[0].end_angle);
        }
        let total: f64 = sectors.iter().map(FlatSector::sweep).sum();
        assert!((total - 360.0).abs() < 1e-9);
    }

    #[test]
    fn test_builtin_partition() {
        let map = SectorMap::build(Taxonomy::builtin(), &BuiltinLabels, Language::Fr);
        assert_eq!(map.len(), 44);
        assert_partition(&map);
    }

    #[test]
    fn test_partition_for_many_sizes() {
        for (categories, items) in [(1, 1), (1, 7), (3, 5), (4, 15), (7, 13), (11, 3)] {
            let map = SectorMap::build(
                &uniform_taxonomy(categories, items),
                &BuiltinLabels,
                Language::Fr,
            );
            assert_eq!(map.len(), categories * items);
            assert_partition(&map);
        }
    }

    #[test]
    fn test_uneven_categories_weighted_by_items_only() {
        let cats = vec![
            DescriptorCategory::new("big", "Big", "#FF0000", &["a", "b", "c"]).unwrap(),
            DescriptorCategory::new("small", "Small", "#0000FF", &["d"]).unwrap(),
        ];
        let taxonomy = Taxonomy::new(cats, &[]).unwrap();
        let map = SectorMap::build(&taxonomy, &BuiltinLabels, Language::Fr);
        for sector in map.sectors() {
            assert_eq!(sector.sweep(), 90.0);
        }
        assert_eq!(map.sectors()[3].category.as_str(), "small");
        assert_eq!(map.sectors()[3].mid_angle, 315.0);
    }

    #[test]
    fn test_empty_taxonomy() {
        let taxonomy = Taxonomy::new(Vec::new(), &[]).unwrap();
        let map = SectorMap::build(&taxonomy, &BuiltinLabels, Language::Fr);
        assert!(map.is_empty());
        assert_eq!(map.angle_per_item(), 0.0);
    }

    #[test]
    fn test_override_color_and_text_color() {
        let map = SectorMap::build(Taxonomy::builtin(), &BuiltinLabels, Language::Fr);
        let taxonomy = Taxonomy::builtin();
        let idx = map.position(&taxonomy.lookup("Chocolat noir").unwrap()).unwrap();
        let sector = &map.sectors()[idx];
        assert_eq!(cupping::taxonomy::to_hex(sector.color), "#462920");
        assert_eq!(sector.text_color, cupping::taxonomy::LIGHT_TEXT);
    }

    #[test]
    fn test_relabel_keeps_layout() {
        let taxonomy = uniform_taxonomy(4, 15);
        let labels = TaggedLabels::for_taxonomy(&taxonomy);
        let mut map = SectorMap::build(&taxonomy, &labels, Language::Fr);
        assert_eq!(map.len(), 60);
        for sector in map.sectors() {
            assert_eq!(sector.sweep(), 6.0);
        }

        let before = map.sectors().to_vec();
        for language in [Language::En, Language::Es, Language::Fr] {
            map.relabel(&taxonomy, &labels, language);
            assert_eq!(map.language(), language);
            for (old, new) in before.iter().zip(map.sectors()) {
                assert_eq!(old.start_angle, new.start_angle);
                assert_eq!(old.end_angle, new.end_angle);
                assert_eq!(old.key, new.key);
                assert_eq!(new.label, format!("{}@{}", new.key, language));
            }
        }
    }

    #[test]
    fn test_builtin_relabel_changes_text() {
        let taxonomy = Taxonomy::builtin();
        let mut map = SectorMap::build(taxonomy, &BuiltinLabels, Language::Fr);
        assert_eq!(map.sectors()[0].label, "Citron");
        assert_eq!(map.sectors()[0].category_label, "Fruité");
        map.relabel(taxonomy, &BuiltinLabels, Language::En);
        assert_eq!(map.sectors()[0].label, "Lemon");
        assert_eq!(map.sectors()[0].category_label, "Fruity");
    }
}
