//! Document languages and the store locale table.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use appstream_fastlane_core::LanguagesConfig;

/// Locale code used for untranslated text.
pub const DEFAULT_LOCALE: &str = "en-US";

/// Built-in mapping from translation codes to store locale codes.
///
/// `None` marks languages that Android does not support; they are dropped.
/// F-Droid accepts more than the Play Store, and Android falls back from the
/// region-specific codes, so the specific forms below are safe.
pub const LANGUAGE_TABLE: &[(&str, Option<&str>)] = &[
    ("ca-valencia", None),
    ("cs", Some("cs-CZ")),
    ("de", Some("de-DE")),
    ("es", Some("es-ES")),
    ("eu", Some("eu-ES")),
    ("fi", Some("fi-FI")),
    ("fr", Some("fr-FR")),
    ("gl", Some("gl-ES")),
    ("ia", None),
    ("it", Some("it-IT")),
    ("ko", Some("ko-KR")),
    ("nl", Some("nl-NL")),
    ("pl", Some("pl-PL")),
    ("pt", Some("pt-PT")),
    ("ru", Some("ru-RU")),
    ("sv", Some("sv-SE")),
    ("x-test", None),
];

/// Language of a piece of AppStream text.
///
/// `Default` sorts first, so it leads every iteration over languages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    /// Untranslated text (no `xml:lang`).
    Default,
    /// Text tagged with an `xml:lang` code.
    Code(String),
}

impl Language {
    /// Language of an optional `xml:lang` value.
    pub fn from_attr(lang: Option<&str>) -> Self {
        match lang {
            Some(code) if !code.is_empty() => Language::Code(code.to_string()),
            _ => Language::Default,
        }
    }

    /// Whether this is the untranslated language.
    pub fn is_default(&self) -> bool {
        matches!(self, Language::Default)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Default => write!(f, "default"),
            Language::Code(code) => write!(f, "{}", code),
        }
    }
}

/// Every language of a document. Always contains [`Language::Default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet(BTreeSet<Language>);

impl LanguageSet {
    /// A set holding only the default language.
    pub fn new() -> Self {
        let mut set = BTreeSet::new();
        set.insert(Language::Default);
        Self(set)
    }

    /// Add a language.
    pub fn insert(&mut self, language: Language) {
        self.0.insert(language);
    }

    /// Whether the language is part of the set.
    pub fn contains(&self, language: &Language) -> bool {
        self.0.contains(language)
    }

    /// Languages in order, default first.
    pub fn iter(&self) -> impl Iterator<Item = &Language> {
        self.0.iter()
    }

    /// Number of languages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true; the default language is always present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for LanguageSet {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> FromIterator<&'a str> for LanguageSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for code in iter {
            set.insert(Language::from_attr(Some(code)));
        }
        set
    }
}

/// Resolves document languages to store locale codes.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    mappings: BTreeMap<String, Option<String>>,
}

impl LanguageTable {
    /// The built-in table.
    pub fn builtin() -> Self {
        Self {
            mappings: LANGUAGE_TABLE
                .iter()
                .map(|(code, target)| (code.to_string(), target.map(str::to_string)))
                .collect(),
        }
    }

    /// The built-in table with configured additions applied on top.
    pub fn from_config(config: &LanguagesConfig) -> Self {
        let mut table = Self::builtin();
        for (code, target) in &config.mappings {
            table.mappings.insert(code.clone(), Some(target.clone()));
        }
        for code in &config.unsupported {
            table.mappings.insert(code.clone(), None);
        }
        table
    }

    /// Store locale for a language, or `None` if the language is dropped.
    ///
    /// Codes missing from the table are used unchanged.
    pub fn resolve(&self, language: &Language) -> Option<String> {
        match language {
            Language::Default => Some(DEFAULT_LOCALE.to_string()),
            Language::Code(code) => match self.mappings.get(code) {
                Some(target) => target.clone(),
                None => Some(code.clone()),
            },
        }
    }

    /// Store locale of untranslated text.
    pub fn default_locale(&self) -> &'static str {
        DEFAULT_LOCALE
    }
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self::builtin()
    }
}
