//! Desktop entry reader.

use std::path::Path;

use ini::{Ini, ParseOption};

use crate::{MetadataError, Result};

const DESKTOP_ENTRY_SECTION: &str = "Desktop Entry";

// Desktop entries use `;` lists and `\s`-style escapes that ini quoting
// would mangle.
fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

/// Categories declared by a desktop entry file.
pub fn desktop_categories(path: &Path) -> Result<Vec<String>> {
    let entry = Ini::load_from_file_opt(path, parse_option()).map_err(|e| {
        MetadataError::Desktop {
            path: path.to_path_buf(),
            message: e.to_string(),
        }
    })?;
    Ok(categories_of(&entry))
}

/// Categories declared in desktop entry content.
pub fn parse_desktop_categories(content: &str) -> Result<Vec<String>> {
    let entry = Ini::load_from_str_opt(content, parse_option()).map_err(|e| {
        MetadataError::Desktop {
            path: "<memory>".into(),
            message: e.to_string(),
        }
    })?;
    Ok(categories_of(&entry))
}

fn categories_of(entry: &Ini) -> Vec<String> {
    entry
        .section(Some(DESKTOP_ENTRY_SECTION))
        .and_then(|section| section.get("Categories"))
        .map(|value| {
            value
                .split(';')
                .map(str::trim)
                .filter(|category| !category.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
