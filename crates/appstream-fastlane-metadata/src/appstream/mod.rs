//! AppStream document reader.
//!
//! Turns a `*.metainfo.xml` / `*.appdata.xml` document into a
//! [`TranslationBundle`]. Textual elements are extracted for every language
//! of the document; repeated elements (one per translation) are merged into
//! the same mapping.

pub mod text;

use std::collections::BTreeMap;
use std::path::Path;

use tracing::debug;

use crate::types::bundle::TranslationBundle;
use crate::types::language::{Language, LanguageSet};
use crate::types::translations::Translations;
use crate::xml::{self, Element};
use crate::{MetadataError, Result};

pub use text::extract_text;

/// Application identifier of a document path.
///
/// The file name has the form `<id>.appdata.xml` or `<id>.metainfo.xml`, so
/// two extensions are stripped.
pub fn application_id(path: &Path) -> Option<String> {
    let once = Path::new(path.file_stem()?);
    let twice = once.file_stem()?;
    Some(twice.to_string_lossy().into_owned())
}

/// Every language used below the document root.
pub fn document_languages(root: &Element) -> LanguageSet {
    let mut languages = LanguageSet::new();
    for element in root.descendants() {
        languages.insert(Language::from_attr(element.language()));
    }
    languages
}

/// Read and parse an AppStream document.
pub fn load_bundle(path: &Path) -> Result<TranslationBundle> {
    let root = xml::load_document(path)?;
    parse_bundle(&root)
}

/// Build the translation bundle of a parsed document.
pub fn parse_bundle(root: &Element) -> Result<TranslationBundle> {
    let languages = document_languages(root);
    debug!(languages = languages.len(), "collected document languages");

    let mut fields: BTreeMap<String, Translations> = BTreeMap::new();
    let mut categories = None;
    let mut screenshots = Vec::new();

    for child in root.children() {
        let key = match child.attr("type") {
            Some(kind) => format!("{}-{}", child.tag(), kind),
            None => child.tag().to_string(),
        };

        match key.as_str() {
            "categories" => {
                categories = Some(
                    child
                        .children()
                        .iter()
                        .filter_map(|category| category.text())
                        .map(|category| category.trim().to_string())
                        .filter(|category| !category.is_empty())
                        .collect(),
                );
            }
            "screenshots" => {
                screenshots = child
                    .children()
                    .iter()
                    .filter(|screenshot| screenshot.tag() == "screenshot")
                    .flat_map(|screenshot| screenshot.children())
                    .filter(|image| image.tag() == "image")
                    .filter_map(|image| image.text())
                    .map(|url| url.trim().to_string())
                    .filter(|url| !url.is_empty())
                    .collect();
            }
            _ => {
                fields
                    .entry(key)
                    .or_default()
                    .concat(&extract_text(child, &languages));
            }
        }
    }

    let mut required = |field: &'static str| -> Result<Translations> {
        let mut value = fields.remove(field).ok_or(MetadataError::MissingField(field))?;
        value.apply_fallback(&languages);
        Ok(value)
    };
    let name = required("name")?;
    let summary = required("summary")?;

    let description = fields.remove("description").map(|mut description| {
        description.apply_fallback(&languages);
        description
    });

    let mut plain = |key: &str| {
        fields
            .remove(key)
            .and_then(|value| value.default_text().map(|text| text.trim().to_string()))
            .filter(|text| !text.is_empty())
    };

    Ok(TranslationBundle {
        homepage: plain("url-homepage"),
        bug_tracker: plain("url-bugtracker"),
        license: plain("project_license"),
        donation: plain("url-donation"),
        languages,
        name,
        summary,
        description,
        categories,
        screenshots,
        source_repo: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<component type="desktop-application">
  <id>org.kde.itinerary</id>
  <name>KDE Itinerary</name>
  <name xml:lang="de">KDE Itinerary DE</name>
  <name xml:lang="ia">Itinerario</name>
  <summary>Digital travel assistant</summary>
  <summary xml:lang="fr">Assistant de voyage</summary>
  <description>
    <p>Show reservations.</p>
    <p xml:lang="de">Zeigt Reservierungen.</p>
  </description>
  <url type="homepage">https://apps.kde.org/itinerary/</url>
  <url type="bugtracker">https://bugs.kde.org/enter_bug.cgi?product=KDE%20Itinerary</url>
  <url type="donation">https://kde.org/donate</url>
  <project_license>LGPL-2.0-or-later</project_license>
  <categories>
    <category>Office</category>
    <category>Utility</category>
  </categories>
  <screenshots>
    <screenshot type="default">
      <caption>Timeline</caption>
      <image>https://cdn.kde.org/screenshots/itinerary/timeline.png</image>
    </screenshot>
    <screenshot>
      <image>https://cdn.kde.org/screenshots/itinerary/details.png</image>
    </screenshot>
  </screenshots>
</component>"#;

    fn bundle(xml: &str) -> Result<TranslationBundle> {
        let root = crate::xml::parse_document(xml, Path::new("test.xml"))?;
        parse_bundle(&root)
    }

    fn code(c: &str) -> Language {
        Language::Code(c.to_string())
    }

    #[test]
    fn test_application_id() {
        assert_eq!(
            application_id(&PathBuf::from("/src/org.kde.kate.appdata.xml")).as_deref(),
            Some("org.kde.kate")
        );
        assert_eq!(
            application_id(Path::new("org.kde.itinerary.metainfo.xml")).as_deref(),
            Some("org.kde.itinerary")
        );
    }

    #[test]
    fn test_parse_bundle_fields() {
        let bundle = bundle(DOCUMENT).unwrap();

        assert_eq!(bundle.name.default_text(), Some("KDE Itinerary"));
        assert_eq!(bundle.name.get(&code("de")), Some("KDE Itinerary DE"));
        assert_eq!(bundle.summary.get(&code("fr")), Some("Assistant de voyage"));
        assert_eq!(
            bundle.homepage.as_deref(),
            Some("https://apps.kde.org/itinerary/")
        );
        assert_eq!(bundle.donation.as_deref(), Some("https://kde.org/donate"));
        assert_eq!(bundle.license.as_deref(), Some("LGPL-2.0-or-later"));
        assert_eq!(
            bundle.categories,
            Some(vec!["Office".to_string(), "Utility".to_string()])
        );
        assert_eq!(
            bundle.screenshots,
            vec![
                "https://cdn.kde.org/screenshots/itinerary/timeline.png",
                "https://cdn.kde.org/screenshots/itinerary/details.png",
            ]
        );
        assert_eq!(bundle.source_repo, None);
    }

    #[test]
    fn test_fallback_completeness() {
        let bundle = bundle(DOCUMENT).unwrap();
        let description = bundle.description.as_ref().unwrap();

        for language in bundle.languages.iter() {
            for field in [&bundle.name, &bundle.summary, description] {
                let text = field.get(language).unwrap();
                assert!(!text.is_empty(), "empty text for {}", language);
            }
        }
        assert_eq!(bundle.summary.get(&code("de")), Some("Digital travel assistant"));
        assert_eq!(description.get(&code("fr")), Some("Show reservations.\n"));
        assert_eq!(description.get(&code("de")), Some("Zeigt Reservierungen.\n"));
    }

    #[test]
    fn test_languages_include_nested_elements() {
        let bundle = bundle(DOCUMENT).unwrap();
        let codes: Vec<String> = bundle.languages.iter().map(ToString::to_string).collect();
        assert_eq!(codes, vec!["default", "de", "fr", "ia"]);
    }

    #[test]
    fn test_optional_fields_absent() {
        let bundle = bundle("<component><name>App</name><summary>Short</summary></component>").unwrap();

        assert_eq!(bundle.categories, None);
        assert!(bundle.screenshots.is_empty());
        assert!(bundle.description.is_none());
        assert!(bundle.homepage.is_none());
        assert!(bundle.donation.is_none());
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let result = bundle("<component><summary>Short</summary></component>");
        assert!(matches!(result, Err(MetadataError::MissingField("name"))));
    }
}
