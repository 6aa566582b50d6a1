/*!
 * Configuration handling for dirclip
 *
 * Settings come from three layers: built-in defaults, an optional JSON
 * settings file, and command-line overrides.
 */

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::output::Sink;
use crate::utils::normalize_extension;
use crate::{bail, ensure};

/// Settings file looked up in the working directory
pub const LOCAL_SETTINGS_FILE: &str = "dirclip.json";

/// How files above the size limit are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OversizePolicy {
    /// Leave the file out of the output entirely
    #[default]
    Omit,
    /// Keep the file marker and note that its content was left out
    MarkerOnly,
}

/// Command-line arguments for dirclip
#[derive(Parser, Debug, Clone, Default)]
#[clap(
    name = "dirclip",
    version = crate::VERSION,
    about = "Render a directory tree and its source files as one text document",
    long_about = "Walks a directory, keeps files by extension and size, and renders the hierarchy with every file's content inlined. The result goes to the clipboard by default."
)]
pub struct Args {
    /// Directory to render (overrides sourcePath from the settings file)
    pub directory_path: Option<String>,

    /// Path to a JSON settings file
    #[clap(long, value_name = "FILE")]
    pub config: Option<String>,

    /// Comma-separated list of file extensions to include (e.g. .rs,.toml)
    #[clap(long, value_delimiter = ',')]
    pub ext: Option<Vec<String>>,

    /// Comma-separated list of directory names to skip
    #[clap(long, value_delimiter = ',')]
    pub skip: Option<Vec<String>>,

    /// Maximum file size in KB, 0 or less disables the limit
    #[clap(long, value_name = "KB", allow_negative_numbers = true)]
    pub max_size_kb: Option<i64>,

    /// Minify the rendered output
    #[clap(long)]
    pub minify: bool,

    /// How to treat files above the size limit
    #[clap(long, value_enum)]
    pub oversized: Option<OversizePolicy>,

    /// Print the output instead of copying it to the clipboard
    #[clap(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Write the output to a file instead of the clipboard
    #[clap(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Do not print the summary report
    #[clap(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Render settings, as stored in the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Traversal root when no path is given on the command line
    pub source_path: String,

    /// Extensions of files to include, compared case-insensitively
    pub include_extensions: Vec<String>,

    /// Directory names to skip at any depth
    pub skip_directories: Vec<String>,

    /// Size limit in KB; 0 or less means no limit
    #[serde(rename = "maxFileSizeKB")]
    pub max_file_size_kb: i64,

    /// Run the minifier over the rendered text
    pub minify_output: bool,

    /// Treatment of files above the size limit
    #[serde(default)]
    pub oversized_files: OversizePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_path: ".".to_string(),
            include_extensions: [".rs", ".toml", ".md"].map(String::from).to_vec(),
            skip_directories: [".git", "target", "node_modules", "bin", "obj"]
                .map(String::from)
                .to_vec(),
            max_file_size_kb: 500,
            minify_output: false,
            oversized_files: OversizePolicy::Omit,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load settings from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| {
            crate::error!(Config, "Failed to read settings file {}: {}", path.display(), e)
        })?;
        Self::from_json(&text)
    }

    /// Size limit in bytes, `None` when unlimited
    pub fn max_file_size_bytes(&self) -> Option<u64> {
        if self.max_file_size_kb <= 0 {
            None
        } else {
            Some((self.max_file_size_kb as u64).saturating_mul(1024))
        }
    }

    /// Included extensions, lowercased and dot-prefixed
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.include_extensions
            .iter()
            .map(|e| normalize_extension(e))
            .collect()
    }

    /// Skipped directory names, lowercased
    pub fn normalized_skip_directories(&self) -> Vec<String> {
        self.skip_directories
            .iter()
            .map(|d| d.trim().to_lowercase())
            .collect()
    }

    /// Apply command-line overrides
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(path) = &args.directory_path {
            self.source_path = path.clone();
        }
        if let Some(ext) = &args.ext {
            self.include_extensions = ext.clone();
        }
        if let Some(skip) = &args.skip {
            self.skip_directories = skip.clone();
        }
        if let Some(kb) = args.max_size_kb {
            self.max_file_size_kb = kb;
        }
        if args.minify {
            self.minify_output = true;
        }
        if let Some(policy) = args.oversized {
            self.oversized_files = policy;
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.source_path.trim().is_empty(),
            Config,
            "sourcePath must not be empty"
        );
        ensure!(
            self.include_extensions.iter().all(|e| !e.trim().is_empty()),
            Config,
            "includeExtensions contains an empty entry"
        );
        ensure!(
            self.skip_directories.iter().all(|d| !d.trim().is_empty()),
            Config,
            "skipDirectories contains an empty entry"
        );

        if self.include_extensions.is_empty() {
            log::warn!("includeExtensions is empty, no files will be included");
        }

        Ok(())
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to render
    pub target_dir: PathBuf,

    /// Effective render settings
    pub settings: Settings,

    /// Where the rendered text goes
    pub sink: Sink,

    /// Settings file that was loaded, if any
    pub settings_file: Option<PathBuf>,

    /// Suppress the summary report
    pub quiet: bool,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let settings_file = locate_settings_file(args.config.as_deref().map(Path::new))?;

        let mut settings = match &settings_file {
            Some(path) => {
                log::debug!("Loading settings from {}", path.display());
                Settings::from_file(path)?
            }
            None => {
                log::debug!("No settings file found, using defaults");
                Settings::default()
            }
        };
        settings.apply_args(&args);

        let sink = if args.stdout {
            Sink::Stdout
        } else if let Some(path) = &args.output {
            Sink::File(PathBuf::from(path))
        } else {
            Sink::Clipboard
        };

        Ok(Self {
            target_dir: PathBuf::from(&settings.source_path),
            settings,
            sink,
            settings_file,
            quiet: args.quiet,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.settings.validate()?;

        // Check if output file directory exists
        if let Sink::File(path) = &self.sink {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    bail!(Config, "Output directory not found: {}", parent.display());
                }
            }
        }

        Ok(())
    }
}

/// Find the settings file to load.
///
/// An explicit path must exist. Otherwise `./dirclip.json` is tried, then
/// `<config dir>/dirclip/settings.json`.
pub fn locate_settings_file(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        ensure!(
            path.is_file(),
            Config,
            "Settings file not found: {}",
            path.display()
        );
        return Ok(Some(path.to_path_buf()));
    }

    let local = PathBuf::from(LOCAL_SETTINGS_FILE);
    if local.is_file() {
        return Ok(Some(local));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join("dirclip").join("settings.json"))
        .filter(|path| path.is_file()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    const FULL_SETTINGS: &str = r#"{
        "sourcePath": "/src/project",
        "includeExtensions": [".cs", "json"],
        "skipDirectories": ["bin", "obj"],
        "maxFileSizeKB": 250,
        "minifyOutput": true
    }"#;

    #[test]
    fn test_parse_settings() {
        let settings = Settings::from_json(FULL_SETTINGS).unwrap();

        assert_eq!(settings.source_path, "/src/project");
        assert_eq!(settings.max_file_size_kb, 250);
        assert!(settings.minify_output);
        assert_eq!(settings.oversized_files, OversizePolicy::Omit);
        assert_eq!(settings.normalized_extensions(), vec![".cs", ".json"]);
        assert_eq!(settings.max_file_size_bytes(), Some(250 * 1024));
    }

    #[test]
    fn test_parse_oversize_policy() {
        let json = FULL_SETTINGS.replace(
            "\"minifyOutput\": true",
            "\"minifyOutput\": true, \"oversizedFiles\": \"markerOnly\"",
        );
        let settings = Settings::from_json(&json).unwrap();
        assert_eq!(settings.oversized_files, OversizePolicy::MarkerOnly);
    }

    #[test]
    fn test_missing_field_is_error() {
        let json = r#"{ "sourcePath": ".", "includeExtensions": [".rs"] }"#;
        let err = Settings::from_json(json).unwrap_err();
        assert!(err.to_string().contains("Invalid settings file"));
    }

    #[test]
    fn test_non_positive_limit_disables_cap() {
        let mut settings = Settings::default();
        settings.max_file_size_kb = 0;
        assert_eq!(settings.max_file_size_bytes(), None);
        settings.max_file_size_kb = -5;
        assert_eq!(settings.max_file_size_bytes(), None);
    }

    #[test]
    fn test_cli_reports_crate_version() {
        use clap::CommandFactory;
        assert_eq!(Args::command().get_version(), Some(crate::VERSION));
    }

    #[test]
    fn test_huge_limit_saturates() {
        let mut settings = Settings::default();
        settings.max_file_size_kb = i64::MAX;
        assert_eq!(settings.max_file_size_bytes(), Some(u64::MAX));

        settings.max_file_size_kb = i64::MAX / 2;
        assert_eq!(settings.max_file_size_bytes(), Some(u64::MAX));
    }

    #[test]
    fn test_validate_rejects_blank_entries() {
        let mut settings = Settings::default();
        settings.skip_directories.push("  ".to_string());
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.include_extensions.push(String::new());
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.include_extensions.clear();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_settings_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FULL_SETTINGS.as_bytes()).unwrap();
        let settings_path = file.path().to_string_lossy().to_string();

        let args = Args::parse_from([
            "dirclip",
            "/other/root",
            "--config",
            settings_path.as_str(),
            "--ext",
            ".rs,.toml",
            "--max-size-kb",
            "-1",
            "--stdout",
        ]);
        let config = Config::from_args(args).unwrap();

        assert_eq!(config.target_dir, PathBuf::from("/other/root"));
        assert_eq!(config.settings.include_extensions, vec![".rs", ".toml"]);
        assert_eq!(config.settings.skip_directories, vec!["bin", "obj"]);
        assert_eq!(config.settings.max_file_size_bytes(), None);
        assert!(config.settings.minify_output);
        assert!(matches!(config.sink, Sink::Stdout));
        assert_eq!(config.settings_file.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_explicit_settings_file_must_exist() {
        let err = locate_settings_file(Some(Path::new("/no/such/dirclip.json"))).unwrap_err();
        assert!(err.to_string().contains("Settings file not found"));
    }

    #[test]
    fn test_output_directory_must_exist() {
        let config = Config {
            target_dir: PathBuf::from("."),
            settings: Settings::default(),
            sink: Sink::File(PathBuf::from("/no/such/dir/out.txt")),
            settings_file: None,
            quiet: true,
        };
        assert!(config.validate().is_err());
    }
}
