//! Per-language text.

use std::collections::BTreeMap;

use super::language::{Language, LanguageSet};

/// Text of one field keyed by language, default language first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations(BTreeMap<Language, String>);

impl Translations {
    /// Empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mapping with an empty string for every language of the set.
    pub fn seeded(languages: &LanguageSet) -> Self {
        Self(
            languages
                .iter()
                .map(|language| (language.clone(), String::new()))
                .collect(),
        )
    }

    /// Text for a language.
    pub fn get(&self, language: &Language) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }

    /// Untranslated text.
    pub fn default_text(&self) -> Option<&str> {
        self.get(&Language::Default)
    }

    /// Set the text of a language.
    pub fn insert(&mut self, language: Language, text: impl Into<String>) {
        self.0.insert(language, text.into());
    }

    /// Append text to one language.
    pub fn push(&mut self, language: &Language, text: &str) {
        match self.0.get_mut(language) {
            Some(existing) => existing.push_str(text),
            None => {
                self.0.insert(language.clone(), text.to_string());
            }
        }
    }

    /// Append text to every language of the set.
    pub fn push_all(&mut self, languages: &LanguageSet, text: &str) {
        for language in languages.iter() {
            self.push(language, text);
        }
    }

    /// Append another mapping language by language.
    pub fn concat(&mut self, other: &Translations) {
        for (language, text) in &other.0 {
            self.push(language, text);
        }
    }

    /// Fill every absent or empty language with the default text.
    pub fn apply_fallback(&mut self, languages: &LanguageSet) {
        let fallback = self.default_text().unwrap_or_default().to_string();
        for language in languages.iter() {
            let entry = self.0.entry(language.clone()).or_default();
            if entry.is_empty() {
                entry.clone_from(&fallback);
            }
        }
    }

    /// Iterate over `(language, text)` pairs, default first.
    pub fn iter(&self) -> impl Iterator<Item = (&Language, &str)> {
        self.0.iter().map(|(language, text)| (language, text.as_str()))
    }

    /// Number of languages with an entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no language has an entry.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Language, String)> for Translations {
    fn from_iter<I: IntoIterator<Item = (Language, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
