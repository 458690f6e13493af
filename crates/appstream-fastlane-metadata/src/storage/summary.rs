//! Per-application store summary (`<app_id>.yml`).
//!
//! See <https://f-droid.org/en/docs/Build_Metadata_Reference/>.

use serde::{Deserialize, Serialize};

use appstream_fastlane_core::StoreConfig;

use crate::types::bundle::TranslationBundle;

/// Summary descriptor of one application.
///
/// Fields are declared in alphabetical key order, which is the order they
/// are written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StoreSummary {
    /// Store categories, always ending with the configured extra category.
    pub categories: Vec<String>,
    /// Donation page.
    pub donate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_tracker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_code: Option<String>,
    /// Untranslated one-line summary.
    pub summary: String,
    /// Translation portal.
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_site: Option<String>,
}

impl StoreSummary {
    /// Summary of a bundle whose category fallback has already been applied.
    pub fn from_bundle(bundle: &TranslationBundle, store: &StoreConfig) -> Self {
        let mut categories = bundle.categories.clone().unwrap_or_default();
        if !store.extra_category.is_empty() {
            categories.push(store.extra_category.clone());
        }

        Self {
            categories,
            donate: bundle
                .donation
                .clone()
                .unwrap_or_else(|| store.donation_url.clone()),
            issue_tracker: bundle.bug_tracker.clone(),
            license: bundle.license.clone(),
            source_code: bundle.source_repo.clone(),
            summary: bundle.summary.default_text().unwrap_or_default().to_string(),
            translation: store.translation_url.clone(),
            web_site: bundle.homepage.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::language::Language;

    fn bundle() -> TranslationBundle {
        let mut bundle = TranslationBundle::default();
        bundle.summary.insert(Language::Default, "Text editor");
        bundle
            .summary
            .insert(Language::Code("de".to_string()), "Texteditor");
        bundle
    }

    #[test]
    fn test_minimal_summary() {
        let summary = StoreSummary::from_bundle(&bundle(), &StoreConfig::default());
        let yaml = serde_yaml::to_string(&summary).unwrap();

        assert!(yaml.starts_with("Categories:\n- KDE\n"));
        assert!(yaml.contains("Summary: Text editor\n"));
        assert!(!yaml.contains("IssueTracker"));
        assert!(!yaml.contains("WebSite"));

        let parsed: StoreSummary = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, summary);
        assert_eq!(parsed.donate, "https://kde.org/community/donations/");
        assert_eq!(parsed.translation, "https://l10n.kde.org/");
    }

    #[test]
    fn test_full_summary_key_order() {
        let mut bundle = bundle();
        bundle.categories = Some(vec!["Utility".to_string()]);
        bundle.homepage = Some("https://kate-editor.org".to_string());
        bundle.bug_tracker = Some("https://bugs.kde.org".to_string());
        bundle.license = Some("GPL-2.0-or-later".to_string());
        bundle.donation = Some("https://kde.org/donate".to_string());
        bundle.source_repo = Some("https://invent.kde.org/utilities/kate.git".to_string());

        let summary = StoreSummary::from_bundle(&bundle, &StoreConfig::default());
        let yaml = serde_yaml::to_string(&summary).unwrap();
        let keys: Vec<&str> = yaml
            .lines()
            .filter(|line| !line.starts_with('-'))
            .filter_map(|line| line.split(':').next())
            .collect();

        assert_eq!(
            keys,
            vec![
                "Categories",
                "Donate",
                "IssueTracker",
                "License",
                "SourceCode",
                "Summary",
                "Translation",
                "WebSite"
            ]
        );
        assert_eq!(summary.categories, vec!["Utility", "KDE"]);
        assert_eq!(summary.donate, "https://kde.org/donate");
    }

    #[test]
    fn test_configured_store_values() {
        let store = StoreConfig {
            extra_category: String::new(),
            donation_url: "https://example.org/give".to_string(),
            translation_url: "https://example.org/l10n".to_string(),
        };
        let summary = StoreSummary::from_bundle(&bundle(), &store);

        assert!(summary.categories.is_empty());
        assert_eq!(summary.donate, "https://example.org/give");
        assert_eq!(summary.translation, "https://example.org/l10n");
    }
}
