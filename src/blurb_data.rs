/// Data structures for Blurbinator
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

/// Top-level grouping of blurb files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Folder {
    DrBlurbs,
    SaBlurbs,
}

impl Folder {
    pub const ALL: [Folder; 2] = [Folder::DrBlurbs, Folder::SaBlurbs];

    /// Directory name under the bundled `blurbs/` path
    pub fn name(self) -> &'static str {
        match self {
            Folder::DrBlurbs => "DRBlurbs",
            Folder::SaBlurbs => "SABlurbs",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Folder::DrBlurbs => "DR Blurbs",
            Folder::SaBlurbs => "SA Blurbs",
        }
    }

    /// File stems shipped for this folder. Each stem becomes a category name.
    pub fn files(self) -> &'static [&'static str] {
        match self {
            Folder::DrBlurbs => &["JewelleryDR", "ToysDR"],
            Folder::SaBlurbs => &["JewellerySA", "NTJewellerySA", "ToysSA"],
        }
    }
}

/// A single language version of a blurb
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub language: String,
    pub text: String,
}

/// A titled blurb with its translations in document order
#[derive(Debug, Clone, PartialEq)]
pub struct Blurb {
    pub title: String,
    pub translations: Vec<Translation>,
}

impl Blurb {
    /// The default language is the first one listed in the source file
    pub fn default_language(&self) -> Option<&str> {
        self.translations.first().map(|t| t.language.as_str())
    }

    pub fn text(&self, language: &str) -> Option<&str> {
        self.translations
            .iter()
            .find(|t| t.language == language)
            .map(|t| t.text.as_str())
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.translations.iter().map(|t| t.language.as_str())
    }
}

/// One blurb file, named after its file stem
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub name: String,
    pub blurbs: Vec<Blurb>,
}

impl Category {
    /// Parse the contents of a blurb file: `{ title: { lang: text } }`
    pub fn from_json(name: &str, json: &str) -> Result<Category, serde_json::Error> {
        let entries: OrderedEntries<OrderedEntries<String>> = serde_json::from_str(json)?;

        let blurbs = entries
            .0
            .into_iter()
            .map(|(title, langs)| Blurb {
                title,
                translations: langs
                    .0
                    .into_iter()
                    .map(|(language, text)| Translation { language, text })
                    .collect(),
            })
            .collect();

        Ok(Category {
            name: name.to_string(),
            blurbs,
        })
    }

    pub fn blurb(&self, title: &str) -> Option<&Blurb> {
        self.blurbs.iter().find(|b| b.title == title)
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.blurbs.iter().map(|b| b.title.as_str())
    }
}

/// All categories loaded for one folder
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlurbSet {
    pub folder: Option<Folder>,
    pub categories: Vec<Category>,
}

impl BlurbSet {
    pub fn new(folder: Folder, categories: Vec<Category>) -> Self {
        BlurbSet {
            folder: Some(folder),
            categories,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }
}

/// JSON object decoded as a list of pairs so key order survives parsing
struct OrderedEntries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor<V>(std::marker::PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((key, value)) = map.next_entry::<String, V>()? {
                    // Later duplicates win, matching JSON.parse
                    match entries.iter_mut().find(|entry: &&mut (String, V)| entry.0 == key) {
                        Some(slot) => slot.1 = value,
                        None => entries.push((key, value)),
                    }
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(std::marker::PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JEWELLERY_DR: &str = include_str!("../static/blurbs/DRBlurbs/JewelleryDR.json");

    #[test]
    fn test_folder_files() {
        assert_eq!(Folder::DrBlurbs.files(), &["JewelleryDR", "ToysDR"]);
        assert_eq!(
            Folder::SaBlurbs.files(),
            &["JewellerySA", "NTJewellerySA", "ToysSA"]
        );
    }

    #[test]
    fn test_folder_names_and_labels() {
        let names: Vec<&str> = Folder::ALL.iter().map(|f| f.name()).collect();
        assert_eq!(names, ["DRBlurbs", "SABlurbs"]);
        assert_eq!(Folder::DrBlurbs.label(), "DR Blurbs");
        assert_eq!(Folder::SaBlurbs.label(), "SA Blurbs");
    }

    #[test]
    fn test_parse_keeps_document_order() {
        let json = r#"{
            "Zebra Ring": { "fr": "Bague", "en": "Ring" },
            "Anchor Pendant": { "en": "Pendant", "de": "Anhänger", "fr": "Pendentif" }
        }"#;

        let category = Category::from_json("JewelleryDR", json).unwrap();

        let titles: Vec<&str> = category.titles().collect();
        assert_eq!(titles, vec!["Zebra Ring", "Anchor Pendant"]);

        let langs: Vec<&str> = category.blurbs[1].languages().collect();
        assert_eq!(langs, vec!["en", "de", "fr"]);
        assert_eq!(category.blurbs[0].default_language(), Some("fr"));
    }

    #[test]
    fn test_parse_duplicate_key_keeps_position_takes_last_value() {
        let json = r#"{ "A": { "en": "one", "fr": "un", "en": "uno" } }"#;

        let category = Category::from_json("X", json).unwrap();
        let blurb = category.blurb("A").unwrap();

        assert_eq!(blurb.default_language(), Some("en"));
        assert_eq!(blurb.text("en"), Some("uno"));
        assert_eq!(blurb.translations.len(), 2);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        assert!(Category::from_json("X", "[1, 2, 3]").is_err());
        assert!(Category::from_json("X", r#"{ "A": "not a map" }"#).is_err());
        assert!(Category::from_json("X", "{ broken").is_err());
    }

    #[test]
    fn test_empty_blurb_has_no_default_language() {
        let category = Category::from_json("X", r#"{ "Empty": {} }"#).unwrap();
        assert_eq!(category.blurbs[0].default_language(), None);
    }

    #[test]
    fn test_bundled_sample_parses() {
        let category = Category::from_json("JewelleryDR", JEWELLERY_DR).unwrap();

        assert!(!category.blurbs.is_empty());
        for blurb in &category.blurbs {
            assert!(blurb.default_language().is_some(), "{} has no languages", blurb.title);
        }
    }

    #[test]
    fn test_blurb_set_lookup() {
        let set = BlurbSet::new(
            Folder::DrBlurbs,
            vec![Category {
                name: "ToysDR".to_string(),
                blurbs: vec![],
            }],
        );

        assert!(!set.is_empty());
        assert!(set.category("ToysDR").is_some());
        assert!(set.category("JewelleryDR").is_none());
        assert!(BlurbSet::default().is_empty());
    }
}
