//! Rich text extraction.
//!
//! AppStream descriptions interleave untranslated elements with their
//! translations:
//!
//! ```xml
//! <description>
//!   <p>Hello</p>
//!   <p xml:lang="de">Hallo</p>
//!   <p>World</p>
//! </description>
//! ```
//!
//! Translations may be missing for some paragraphs only, so every untagged
//! child starts a group that collects the following tagged children. Each
//! group is resolved against the default text before it is appended, which
//! gives `Hello\nWorld\n` and `Hallo\nWorld\n` above.
//!
//! F-Droid and Google Play accept a small subset of inline HTML. Those tags
//! are passed through; list items become bullet lines.

use crate::types::language::{Language, LanguageSet};
use crate::types::translations::Translations;
use crate::xml::Element;

/// Inline tags copied into the output.
pub const RICH_TEXT_TAGS: &[&str] = &["b", "u", "i"];

/// Prefix of list items.
pub const BULLET: &str = "· ";

/// Extract the text of `element` and its children for every language.
pub fn extract_text(element: &Element, languages: &LanguageSet) -> Translations {
    let language = Language::from_attr(element.language());
    let tag = element.tag();
    let mut found = Translations::seeded(languages);

    // Untranslated markup without text of its own wraps every language.
    let rich = RICH_TEXT_TAGS.contains(&tag);
    let scoped = element.has_text() || !language.is_default();

    if rich {
        let open = format!("<{}>", tag);
        if scoped {
            found.push(&language, &open);
        } else {
            found.push_all(languages, &open);
        }
    } else if tag == "li" {
        found.push(&language, BULLET);
    }

    if element.has_text() {
        if let Some(text) = element.text() {
            found.push(&language, text);
        }
    }

    let mut group: Option<Translations> = None;
    for child in element.children() {
        if child.language().is_none() {
            if let Some(finished) = group.take() {
                append_group(&mut found, finished, languages);
            }
        }
        group
            .get_or_insert_with(Translations::new)
            .concat(&extract_text(child, languages));
    }
    if let Some(finished) = group {
        append_group(&mut found, finished, languages);
    }

    if rich {
        let close = format!("</{}>", tag);
        if scoped {
            found.push(&language, &close);
        } else {
            found.push_all(languages, &close);
        }
    }

    if tag == "p" || tag == "li" {
        found.push(&language, "\n");
    }

    found
}

fn append_group(found: &mut Translations, mut group: Translations, languages: &LanguageSet) {
    group.apply_fallback(languages);
    for language in languages.iter() {
        if let Some(text) = group.get(language) {
            found.push(language, text);
        }
    }
}
