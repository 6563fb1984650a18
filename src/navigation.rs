/// View navigation for the blurb browser: Home -> Category -> Blurb
use std::sync::atomic::{AtomicU64, Ordering};

use crate::blurb_data::{Blurb, BlurbSet, Category, Folder};
use crate::error::NavigationError;

/// Which screen is showing. Each variant carries exactly the selection it needs,
/// so a blurb can never be selected without its category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Home,
    Category { category: String },
    Blurb { category: String, title: String },
}

impl ViewState {
    pub fn category(&self) -> Option<&str> {
        match self {
            ViewState::Home => None,
            ViewState::Category { category } | ViewState::Blurb { category, .. } => Some(category.as_str()),
        }
    }

    pub fn blurb(&self) -> Option<&str> {
        match self {
            ViewState::Blurb { title, .. } => Some(title.as_str()),
            _ => None,
        }
    }
}

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Identifies one folder load. Only the most recently started load may land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    pub folder: Folder,
    generation: u64,
}

impl LoadTicket {
    pub fn issue(folder: Folder) -> LoadTicket {
        LoadTicket {
            folder,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }
}

/// Chosen language per blurb title of the open category, in blurb order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LanguageSelection(Vec<(String, String)>);

impl LanguageSelection {
    /// Every blurb starts on its first listed language
    pub fn defaults_for(category: &Category) -> Self {
        LanguageSelection(
            category
                .blurbs
                .iter()
                .filter_map(|b| {
                    b.default_language()
                        .map(|lang| (b.title.clone(), lang.to_string()))
                })
                .collect(),
        )
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(t, _)| t == title)
            .map(|(_, lang)| lang.as_str())
    }

    pub fn set(&mut self, title: &str, language: &str) {
        match self.0.iter_mut().find(|(t, _)| t == title) {
            Some(entry) => entry.1 = language.to_string(),
            None => self.0.push((title.to_string(), language.to_string())),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Everything the blurb browser shows, minus preferences
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppModel {
    pub blurbs: BlurbSet,
    pub view: ViewState,
    pub languages: LanguageSelection,
    pub search: String,
    /// Folder the user picked last, highlighted even while it loads
    pub selected_folder: Option<Folder>,
    pending: Option<LoadTicket>,
}

impl AppModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a folder load as the latest request. Older tickets become stale.
    pub fn begin_load(&mut self, ticket: LoadTicket) {
        self.selected_folder = Some(ticket.folder);
        self.pending = Some(ticket);
    }

    /// Install a loaded folder. Returns false and changes nothing if a newer
    /// load has started since `ticket` was issued.
    pub fn finish_load(&mut self, ticket: LoadTicket, blurbs: BlurbSet) -> bool {
        if self.pending != Some(ticket) {
            return false;
        }

        self.pending = None;
        self.blurbs = blurbs;
        self.view = ViewState::Home;
        self.languages = LanguageSelection::default();
        self.search.clear();
        true
    }

    pub fn select_category(&mut self, name: &str) -> Result<(), NavigationError> {
        if self.blurbs.is_empty() {
            return Err(NavigationError::NothingLoaded);
        }
        let category = self
            .blurbs
            .category(name)
            .ok_or_else(|| NavigationError::UnknownCategory(name.to_string()))?;

        self.languages = LanguageSelection::defaults_for(category);
        self.search.clear();
        self.view = ViewState::Category {
            category: name.to_string(),
        };
        Ok(())
    }

    pub fn select_blurb(&mut self, title: &str) -> Result<(), NavigationError> {
        let ViewState::Category { category } = &self.view else {
            return Err(NavigationError::NoCategoryOpen);
        };
        let category = category.clone();
        let blurb = self.find_blurb(&category, title)?;

        let language = match self.languages.get(title) {
            Some(lang) if blurb.text(lang).is_some() => lang.to_string(),
            _ => blurb
                .default_language()
                .ok_or_else(|| NavigationError::NoTranslations(title.to_string()))?
                .to_string(),
        };

        self.languages.set(title, &language);
        self.view = ViewState::Blurb {
            category,
            title: title.to_string(),
        };
        Ok(())
    }

    pub fn change_language(&mut self, title: &str, language: &str) -> Result<(), NavigationError> {
        let ViewState::Blurb { category, .. } = &self.view else {
            return Err(NavigationError::NoBlurbOpen);
        };
        let blurb = self.find_blurb(category, title)?;

        if blurb.text(language).is_none() {
            return Err(NavigationError::UnknownLanguage {
                title: title.to_string(),
                language: language.to_string(),
            });
        }

        self.languages.set(title, language);
        Ok(())
    }

    /// One level up: Blurb -> Category, Category -> Home
    pub fn back(&mut self) {
        self.view = match std::mem::take(&mut self.view) {
            ViewState::Blurb { category, .. } => ViewState::Category { category },
            ViewState::Category { .. } | ViewState::Home => {
                self.search.clear();
                ViewState::Home
            }
        };
    }

    pub fn return_home(&mut self) {
        self.search.clear();
        self.view = ViewState::Home;
    }

    /// Search only applies to the category list
    pub fn set_search(&mut self, term: &str) -> Result<(), NavigationError> {
        if !matches!(self.view, ViewState::Category { .. }) {
            return Err(NavigationError::NoCategoryOpen);
        }
        self.search = term.to_string();
        Ok(())
    }

    pub fn open_category(&self) -> Option<&Category> {
        self.view.category().and_then(|name| self.blurbs.category(name))
    }

    pub fn open_blurb(&self) -> Option<&Blurb> {
        let title = self.view.blurb()?;
        self.open_category()?.blurb(title)
    }

    /// Titles of the open category matching the search, case-insensitively
    pub fn visible_titles(&self) -> Vec<&str> {
        let Some(category) = self.open_category() else {
            return Vec::new();
        };
        filter_titles(category.titles(), &self.search)
    }

    pub fn current_language(&self, title: &str) -> Option<&str> {
        self.languages.get(title)
    }

    /// Text of the open blurb in its selected language
    pub fn displayed_text(&self) -> Option<&str> {
        let blurb = self.open_blurb()?;
        let language = self.languages.get(&blurb.title)?;
        blurb.text(language)
    }

    fn find_blurb(&self, category: &str, title: &str) -> Result<&Blurb, NavigationError> {
        self.blurbs
            .category(category)
            .ok_or_else(|| NavigationError::UnknownCategory(category.to_string()))?
            .blurb(title)
            .ok_or_else(|| NavigationError::UnknownBlurb(title.to_string()))
    }
}

/// Case-insensitive substring filter, order preserved
pub fn filter_titles<'a>(titles: impl Iterator<Item = &'a str>, term: &str) -> Vec<&'a str> {
    let needle = term.to_lowercase();
    titles
        .filter(|title| title.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blurb_data::Translation;

    fn blurb(title: &str, langs: &[(&str, &str)]) -> Blurb {
        Blurb {
            title: title.to_string(),
            translations: langs
                .iter()
                .map(|(language, text)| Translation {
                    language: language.to_string(),
                    text: text.to_string(),
                })
                .collect(),
        }
    }

    fn dr_blurbs() -> BlurbSet {
        BlurbSet::new(
            Folder::DrBlurbs,
            vec![
                Category {
                    name: "JewelleryDR".to_string(),
                    blurbs: vec![
                        blurb("Silver Ring", &[("en", "Silver ring"), ("es", "Anillo de plata")]),
                        blurb("Gold Chain", &[("es", "Cadena de oro"), ("en", "Gold chain")]),
                    ],
                },
                Category {
                    name: "ToysDR".to_string(),
                    blurbs: vec![
                        blurb("ToysDR Necklace", &[("en", "Bead necklace")]),
                        blurb("Teddy Bear", &[("en", "Soft bear")]),
                    ],
                },
            ],
        )
    }

    fn loaded_model() -> AppModel {
        let mut model = AppModel::new();
        let ticket = LoadTicket::issue(Folder::DrBlurbs);
        model.begin_load(ticket);
        assert!(model.finish_load(ticket, dr_blurbs()));
        model
    }

    #[test]
    fn test_finish_load_resets_to_home() {
        let mut model = loaded_model();
        model.select_category("JewelleryDR").unwrap();
        model.select_blurb("Silver Ring").unwrap();

        let ticket = LoadTicket::issue(Folder::SaBlurbs);
        model.begin_load(ticket);
        assert!(model.is_loading());
        assert_eq!(model.selected_folder, Some(Folder::SaBlurbs));

        assert!(model.finish_load(ticket, BlurbSet::new(Folder::SaBlurbs, vec![])));
        assert_eq!(model.view, ViewState::Home);
        assert!(model.languages.is_empty());
        assert!(model.blurbs.is_empty());
        assert!(!model.is_loading());
    }

    #[test]
    fn test_stale_load_is_ignored() {
        let mut model = AppModel::new();
        let first = LoadTicket::issue(Folder::DrBlurbs);
        let second = LoadTicket::issue(Folder::SaBlurbs);
        model.begin_load(first);
        model.begin_load(second);

        assert!(!model.finish_load(first, dr_blurbs()));
        assert!(model.blurbs.is_empty());
        assert!(model.is_loading());

        assert!(model.finish_load(second, BlurbSet::new(Folder::SaBlurbs, vec![])));
        assert_eq!(model.blurbs.folder, Some(Folder::SaBlurbs));
    }

    #[test]
    fn test_tickets_are_distinct() {
        let a = LoadTicket::issue(Folder::DrBlurbs);
        let b = LoadTicket::issue(Folder::DrBlurbs);
        assert_ne!(a, b);
    }

    #[test]
    fn test_select_category_requires_loaded_data() {
        let mut model = AppModel::new();
        assert_eq!(
            model.select_category("JewelleryDR"),
            Err(NavigationError::NothingLoaded)
        );

        let mut model = loaded_model();
        assert_eq!(
            model.select_category("Nope"),
            Err(NavigationError::UnknownCategory("Nope".to_string()))
        );
        assert_eq!(model.view, ViewState::Home);
    }

    #[test]
    fn test_select_category_defaults_to_first_language() {
        let mut model = loaded_model();
        model.select_category("JewelleryDR").unwrap();

        assert_eq!(model.current_language("Silver Ring"), Some("en"));
        assert_eq!(model.current_language("Gold Chain"), Some("es"));
        assert_eq!(model.languages.len(), 2);
        assert_eq!(model.visible_titles(), vec!["Silver Ring", "Gold Chain"]);
    }

    #[test]
    fn test_select_category_is_idempotent() {
        let mut model = loaded_model();
        model.select_category("JewelleryDR").unwrap();
        let languages = model.languages.clone();
        let titles: Vec<String> = model.visible_titles().iter().map(|t| t.to_string()).collect();

        model.select_category("JewelleryDR").unwrap();

        assert_eq!(model.languages, languages);
        assert_eq!(model.visible_titles(), titles);
    }

    #[test]
    fn test_select_category_rebuilds_languages_and_clears_search() {
        let mut model = loaded_model();
        model.select_category("JewelleryDR").unwrap();
        model.set_search("silver").unwrap();

        model.select_category("ToysDR").unwrap();

        assert_eq!(model.search, "");
        assert_eq!(model.current_language("Silver Ring"), None);
        assert_eq!(model.current_language("Teddy Bear"), Some("en"));
    }

    #[test]
    fn test_select_blurb_requires_category() {
        let mut model = loaded_model();
        assert_eq!(
            model.select_blurb("Silver Ring"),
            Err(NavigationError::NoCategoryOpen)
        );

        model.select_category("JewelleryDR").unwrap();
        assert_eq!(
            model.select_blurb("Teddy Bear"),
            Err(NavigationError::UnknownBlurb("Teddy Bear".to_string()))
        );
    }

    #[test]
    fn test_select_blurb_shows_selected_language() {
        let mut model = loaded_model();
        model.select_category("JewelleryDR").unwrap();
        model.select_blurb("Gold Chain").unwrap();

        assert_eq!(
            model.view,
            ViewState::Blurb {
                category: "JewelleryDR".to_string(),
                title: "Gold Chain".to_string()
            }
        );
        assert_eq!(model.displayed_text(), Some("Cadena de oro"));
    }

    #[test]
    fn test_change_language_updates_text() {
        let mut model = loaded_model();
        model.select_category("JewelleryDR").unwrap();
        model.select_blurb("Silver Ring").unwrap();

        model.change_language("Silver Ring", "es").unwrap();

        assert_eq!(model.displayed_text(), Some("Anillo de plata"));
        assert_eq!(model.current_language("Silver Ring"), Some("es"));
    }

    #[test]
    fn test_change_language_rejects_unknown_code() {
        let mut model = loaded_model();
        model.select_category("JewelleryDR").unwrap();
        model.select_blurb("Silver Ring").unwrap();

        let err = model.change_language("Silver Ring", "fr").unwrap_err();
        assert!(matches!(err, NavigationError::UnknownLanguage { .. }));
        assert_eq!(model.displayed_text(), Some("Silver ring"));
    }

    #[test]
    fn test_change_language_requires_open_blurb() {
        let mut model = loaded_model();
        model.select_category("JewelleryDR").unwrap();
        assert_eq!(
            model.change_language("Silver Ring", "es"),
            Err(NavigationError::NoBlurbOpen)
        );
    }

    #[test]
    fn test_language_choice_survives_back_navigation() {
        let mut model = loaded_model();
        model.select_category("JewelleryDR").unwrap();
        model.select_blurb("Silver Ring").unwrap();
        model.change_language("Silver Ring", "es").unwrap();

        model.back();
        assert_eq!(
            model.view,
            ViewState::Category {
                category: "JewelleryDR".to_string()
            }
        );

        model.select_blurb("Silver Ring").unwrap();
        assert_eq!(model.displayed_text(), Some("Anillo de plata"));
    }

    #[test]
    fn test_back_from_category_goes_home() {
        let mut model = loaded_model();
        model.select_category("ToysDR").unwrap();
        model.set_search("bear").unwrap();

        model.back();

        assert_eq!(model.view, ViewState::Home);
        assert_eq!(model.search, "");
        assert!(model.visible_titles().is_empty());
    }

    #[test]
    fn test_return_home_discards_selection() {
        let mut model = loaded_model();
        model.select_category("ToysDR").unwrap();
        model.select_blurb("Teddy Bear").unwrap();

        model.return_home();

        assert_eq!(model.view, ViewState::Home);
        assert_eq!(model.view.category(), None);
        assert_eq!(model.view.blurb(), None);
        assert_eq!(model.displayed_text(), None);
        assert!(!model.blurbs.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let mut model = loaded_model();
        model.select_category("ToysDR").unwrap();

        model.set_search("neck").unwrap();
        assert_eq!(model.visible_titles(), vec!["ToysDR Necklace"]);

        model.set_search("TOYS").unwrap();
        assert_eq!(model.visible_titles(), vec!["ToysDR Necklace"]);

        model.set_search("").unwrap();
        assert_eq!(model.visible_titles().len(), 2);

        model.set_search("xyz").unwrap();
        assert!(model.visible_titles().is_empty());
        assert_eq!(model.blurbs.category("ToysDR").unwrap().blurbs.len(), 2);
    }

    #[test]
    fn test_search_outside_category_is_rejected() {
        let mut model = loaded_model();
        assert_eq!(model.set_search("x"), Err(NavigationError::NoCategoryOpen));
    }

    #[test]
    fn test_blurb_without_translations_cannot_open() {
        let mut model = AppModel::new();
        let ticket = LoadTicket::issue(Folder::DrBlurbs);
        model.begin_load(ticket);
        model.finish_load(
            ticket,
            BlurbSet::new(
                Folder::DrBlurbs,
                vec![Category {
                    name: "ToysDR".to_string(),
                    blurbs: vec![blurb("Empty", &[])],
                }],
            ),
        );
        model.select_category("ToysDR").unwrap();

        assert_eq!(
            model.select_blurb("Empty"),
            Err(NavigationError::NoTranslations("Empty".to_string()))
        );
        assert_eq!(model.view.blurb(), None);
    }

    #[test]
    fn test_filter_titles() {
        let titles = ["Gold Ring", "Silver ring", "Necklace"];
        assert_eq!(
            filter_titles(titles.into_iter(), "RING"),
            vec!["Gold Ring", "Silver ring"]
        );
    }
}
