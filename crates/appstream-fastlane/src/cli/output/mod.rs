//! Output formatting utilities

use console::{style, Style};

use appstream_fastlane_metadata::ConversionReport;

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Create a styled key-value line
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Style for paths
pub fn path_style() -> Style {
    Style::new().cyan()
}

/// Print one conversion in human-readable form
pub fn report(report: &ConversionReport) {
    success(&format!(
        "Generated metadata for {}",
        style(&report.app_id).bold()
    ));
    println!(
        "{}",
        key_value(
            "Document",
            &path_style().apply_to(report.appstream.display()).to_string()
        )
    );
    println!("{}", key_value("Locales", &report.locales.join(", ")));
    if let Some(repo) = &report.source_repo {
        println!("{}", key_value("Source", repo));
    }
    println!("{}", key_value("Local images", &report.local_images.to_string()));
    println!(
        "{}",
        key_value("Screenshots", &report.screenshots_downloaded.to_string())
    );
    match &report.icon {
        Some(icon) => println!(
            "{}",
            key_value("Icon", &path_style().apply_to(icon.display()).to_string())
        ),
        None => println!("{}", key_value("Icon", &style("not found").yellow().to_string())),
    }
    println!(
        "{}",
        key_value(
            "Archive",
            &path_style().apply_to(report.archive.display()).to_string()
        )
    );

    for url in &report.screenshots_skipped {
        warning(&format!("Could not download screenshot {}", url));
    }
}
