//! CLI definition and command handling

pub mod output;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use console::style;
use tracing::info;

use appstream_fastlane_core::load_config_or_default;
use appstream_fastlane_metadata::{locate_applications, ApplicationSource, Converter};

use crate::exit_codes;

/// Generate fastlane metadata for Android apps from AppStream metadata
#[derive(Debug, Parser)]
#[command(name = "appstream-fastlane")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// AppStream file to extract metadata from
    #[arg(long, value_name = "PATH")]
    pub appstream: Option<PathBuf>,

    /// Desktop file to extract additional metadata from
    #[arg(long, value_name = "PATH")]
    pub desktop: Option<PathBuf>,

    /// Source directory to find metadata in
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,

    /// Path to which the metadata output should be written to
    #[arg(long, value_name = "DIR")]
    pub output: PathBuf,

    /// Configuration file (default: searched from the source directory upwards)
    #[arg(long, value_name = "PATH", env = "APPSTREAM_FASTLANE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Do not download screenshots
    #[arg(long)]
    pub offline: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// How the applications to convert are found.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    /// A single document given on the command line.
    Explicit(ApplicationSource),
    /// Every application found below the source directory.
    Scan(PathBuf),
}

impl Cli {
    fn mode(&self) -> Option<Mode> {
        if let Some(appstream) = self.appstream.as_ref().filter(|p| p.exists()) {
            return Some(Mode::Explicit(ApplicationSource::explicit(
                appstream,
                self.desktop.clone(),
            )));
        }
        self.source
            .as_ref()
            .filter(|p| p.exists())
            .map(|source| Mode::Scan(source.clone()))
    }

    /// Directory the configuration search starts from
    fn config_search_dir(&self) -> Option<&Path> {
        self.source
            .as_deref()
            .or_else(|| self.appstream.as_deref().and_then(Path::parent))
    }

    /// Execute the conversion, returning the process exit code
    pub fn execute(self) -> anyhow::Result<i32> {
        let Some(mode) = self.mode() else {
            output::error("Either one of --appstream or --source have to be provided!");
            return Ok(exit_codes::USAGE_ERROR);
        };

        std::fs::create_dir_all(&self.output).with_context(|| {
            format!("failed to create output directory {}", self.output.display())
        })?;

        let config = load_config_or_default(self.config.as_deref(), self.config_search_dir())
            .context("failed to load configuration")?;

        let applications = match mode {
            Mode::Explicit(application) => vec![application],
            Mode::Scan(source) => {
                info!(source = %source.display(), "scanning source directory");
                let found = locate_applications(&source, &config.scan)?;
                if found.is_empty() && !self.quiet {
                    output::warning(&format!(
                        "No applications found in {}",
                        output::path_style().apply_to(source.display())
                    ));
                }
                found
            }
        };

        let mut converter = Converter::new(&self.output, config.clone());
        if let Some(source) = &self.source {
            converter = converter.with_source(source);
        }
        converter = self.with_downloads(converter, config.assets.download_screenshots)?;

        let reports = converter.convert_all(&applications)?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            }
            OutputFormat::Text => {
                if !self.quiet {
                    for report in &reports {
                        output::report(report);
                    }
                    if reports.len() > 1 {
                        println!();
                        println!(
                            "{} applications written to {}",
                            style(reports.len()).bold(),
                            output::path_style().apply_to(self.output.display())
                        );
                    }
                }
            }
        }

        Ok(exit_codes::SUCCESS)
    }

    #[cfg(feature = "http")]
    fn with_downloads(&self, converter: Converter, enabled: bool) -> anyhow::Result<Converter> {
        if self.offline || !enabled {
            return Ok(converter);
        }
        let fetcher = appstream_fastlane_metadata::HttpFetcher::new()?;
        Ok(converter.with_fetcher(Box::new(fetcher)))
    }

    #[cfg(not(feature = "http"))]
    fn with_downloads(&self, converter: Converter, _enabled: bool) -> anyhow::Result<Converter> {
        Ok(converter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("appstream-fastlane").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_output_is_required() {
        assert!(Cli::try_parse_from(["appstream-fastlane", "--source", "."]).is_err());
    }

    #[test]
    fn test_parse_flags() {
        let cli = parse(&["--output", "out", "--offline", "-v", "--format", "json"]);
        assert_eq!(cli.output, PathBuf::from("out"));
        assert!(cli.offline);
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_missing_inputs_is_usage_error() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("out");
        let missing = temp.path().join("missing.metainfo.xml");
        let cli = parse(&[
            "--output",
            out.to_str().unwrap(),
            "--appstream",
            missing.to_str().unwrap(),
            "-q",
        ]);

        assert_eq!(cli.execute().unwrap(), exit_codes::USAGE_ERROR);
        assert!(!out.exists());
    }

    #[test]
    fn test_explicit_document_wins_over_source() {
        let temp = TempDir::new().unwrap();
        let doc = temp.path().join("org.kde.app.metainfo.xml");
        std::fs::write(&doc, "<component/>").unwrap();
        let cli = parse(&[
            "--output",
            "out",
            "--appstream",
            doc.to_str().unwrap(),
            "--source",
            temp.path().to_str().unwrap(),
        ]);

        assert_eq!(
            cli.mode(),
            Some(Mode::Explicit(ApplicationSource::explicit(&doc, None)))
        );
        assert_eq!(cli.config_search_dir(), Some(temp.path()));
    }

    #[test]
    fn test_scan_conversion() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        let out = temp.path().join("out");
        std::fs::create_dir_all(src.join("android")).unwrap();
        std::fs::write(
            src.join("android/AndroidManifest.xml"),
            r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="org.kde.app">
  <application><activity><meta-data android:name="android.app.lib_name" android:value="app"/></activity></application>
</manifest>"#,
        )
        .unwrap();
        std::fs::write(
            src.join("org.kde.app.metainfo.xml"),
            "<component><name>App</name><summary>Does things</summary></component>",
        )
        .unwrap();

        let cli = parse(&[
            "--output",
            out.to_str().unwrap(),
            "--source",
            src.to_str().unwrap(),
            "--offline",
            "-q",
        ]);
        assert_eq!(cli.execute().unwrap(), exit_codes::SUCCESS);
        assert_eq!(
            std::fs::read_to_string(out.join("metadata/org.kde.app/en-US/title.txt")).unwrap(),
            "App"
        );
        assert!(out.join("metadata/fastlane-org.kde.app.zip").exists());
    }
}
