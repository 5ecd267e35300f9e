//! # Configuration Module
//!
//! This module loads the checker configuration: where the sources live, which
//! comment tokens each root uses, what to ignore, where reports go, and which
//! finding categories are fixed without asking.
//!
//! Configuration can be written as JSON or TOML and is discovered through the
//! `--config` flag, the `LICENSE_CHECKER_CONFIG` environment variable, or a
//! `license-checker.json` / `license-checker.toml` file in the current
//! directory.
//!
//! ```json
//! {
//!   "basePath": ".",
//!   "reportFolder": "reports",
//!   "licensePath": "license_template.txt",
//!   "fix": ["OUTDATED"],
//!   "printChecking": true,
//!   "configs": [
//!     {
//!       "dir": "src",
//!       "fileExtensions": [".js", ".ts"],
//!       "startMultiComm": "/*",
//!       "endMultiComm": " */",
//!       "prefix": " *",
//!       "ignoreListDirName": ["node_modules"]
//!     }
//!   ]
//! }
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::report::{Category, ParseCategoryError};
use crate::templates::CommentStyle;
use crate::verbose_log;

/// The default config file names, checked in order.
pub const DEFAULT_CONFIG_FILENAMES: [&str; 2] = ["license-checker.json", "license-checker.toml"];

/// Environment variable for specifying config file path.
pub const CONFIG_ENV_VAR: &str = "LICENSE_CHECKER_CONFIG";

const DEFAULT_REPORT_FOLDER: &str = "license_reports";
const DEFAULT_LICENSE_PATH: &str = "license_template.txt";

/// Directories and files excluded from one root.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct IgnoreRules {
  /// Directory paths whose whole subtree is skipped.
  #[serde(default, rename = "ignoreListDir")]
  pub dir_paths: Vec<PathBuf>,

  /// Substrings that exclude any directory whose path contains them.
  #[serde(default, rename = "ignoreListDirName")]
  pub dir_names: Vec<String>,

  /// Individual files to skip.
  #[serde(default, rename = "ignoreListFile")]
  pub file_paths: Vec<PathBuf>,
}

/// One directory tree to check and the comment style its files use.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RootConfig {
  /// Directory to check. Relative paths are resolved against the base path.
  pub dir: PathBuf,

  /// File extensions to check, with or without the leading dot.
  #[serde(rename = "fileExtensions")]
  pub file_extensions: Vec<String>,

  /// Token that opens the header comment (e.g., "/*").
  #[serde(rename = "startMultiComm")]
  pub start_token: String,

  /// Token that closes the header comment (e.g., " */").
  #[serde(rename = "endMultiComm")]
  pub end_token: String,

  /// Prefix for every line inside the header comment (e.g., " *").
  #[serde(default)]
  pub prefix: String,

  #[serde(flatten)]
  pub ignore: IgnoreRules,
}

impl RootConfig {
  pub fn comment_style(&self) -> CommentStyle {
    CommentStyle::new(&self.start_token, &self.end_token, &self.prefix)
  }

  /// Resolves every relative path of this root against `base_path`.
  fn resolve(mut self, base_path: &Path) -> Self {
    self.dir = base_path.join(&self.dir);
    self.ignore.dir_paths = self.ignore.dir_paths.iter().map(|p| base_path.join(p)).collect();
    self.ignore.file_paths = self.ignore.file_paths.iter().map(|p| base_path.join(p)).collect();
    self
  }
}

/// On-disk layout of the configuration document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
  base_path: Option<PathBuf>,
  report_folder: Option<PathBuf>,
  license_path: Option<PathBuf>,
  #[serde(default)]
  fix: Vec<String>,
  #[serde(default)]
  print_checking: bool,
  #[serde(default)]
  print_reports: bool,
  #[serde(default)]
  configs: Vec<RootConfig>,
}

/// Main configuration struct, with every path resolved.
#[derive(Debug, Clone)]
pub struct Config {
  /// Directory that relative paths are resolved against and that report
  /// paths are shown relative to.
  pub base_path: PathBuf,

  /// Folder receiving the per-category report files.
  pub report_folder: PathBuf,

  /// License template file.
  pub license_path: PathBuf,

  /// Categories fixed without confirmation. Empty means "ask, then fix
  /// everything".
  pub auto_fix: BTreeSet<Category>,

  /// Print every file as it is checked.
  pub print_checking: bool,

  /// Print every finding after checking.
  pub print_reports: bool,

  /// Directory trees to check, in order.
  pub roots: Vec<RootConfig>,
}

/// Supported configuration document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
  Json,
  Toml,
}

impl ConfigFormat {
  /// TOML for `.toml` files, JSON for everything else.
  pub fn from_path(path: &Path) -> Self {
    match path.extension().and_then(|ext| ext.to_str()) {
      Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
      _ => Self::Json,
    }
  }
}

/// Error type for configuration operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  /// No config file was given and none was found.
  #[error(
    "No configuration file found. Pass --config <FILE>, set {}, or create one of: {}",
    CONFIG_ENV_VAR,
    DEFAULT_CONFIG_FILENAMES.join(", ")
  )]
  NotFound,

  /// The config file could not be read.
  #[error("Failed to read config file '{path}': {source}")]
  ReadError { path: PathBuf, source: std::io::Error },

  /// The config file contains invalid JSON.
  #[error("Failed to parse config file '{path}': {source}")]
  JsonError { path: PathBuf, source: serde_json::Error },

  /// The config file contains invalid TOML.
  #[error("Failed to parse config file '{path}': {source}")]
  TomlError { path: PathBuf, source: toml::de::Error },

  /// The `fix` list names a category that does not exist.
  #[error("Invalid value in \"fix\" in '{path}': {source}")]
  InvalidFixCategory { path: PathBuf, source: ParseCategoryError },

  /// A root has unusable comment tokens.
  #[error("Invalid comment style for '{dir}': {message}")]
  InvalidCommentStyle { dir: PathBuf, message: String },

  /// The `configs` list is missing or empty.
  #[error("Config file '{path}' does not define any directories in \"configs\"")]
  NoRoots { path: PathBuf },
}

impl Config {
  /// Load configuration from a file.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file
  ///
  /// # Returns
  ///
  /// The loaded configuration, or an error if the file cannot be read,
  /// parsed, or validated.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    verbose_log!("Loading config from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
      path: path.to_path_buf(),
      source,
    })?;

    let config_dir = match path.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent,
      _ => Path::new("."),
    };

    let config = Self::parse(&content, ConfigFormat::from_path(path), path, config_dir)?;
    verbose_log!("Loaded {} root directories", config.roots.len());
    Ok(config)
  }

  /// Parse and validate configuration text.
  ///
  /// # Arguments
  ///
  /// * `content` - The configuration document
  /// * `format` - Format of the document
  /// * `origin` - Path used in error messages
  /// * `config_dir` - Directory a relative `basePath` is resolved against
  pub fn parse(content: &str, format: ConfigFormat, origin: &Path, config_dir: &Path) -> Result<Self, ConfigError> {
    let raw: RawConfig = match format {
      ConfigFormat::Json => serde_json::from_str(content).map_err(|source| ConfigError::JsonError {
        path: origin.to_path_buf(),
        source,
      })?,
      ConfigFormat::Toml => toml::from_str(content).map_err(|source| ConfigError::TomlError {
        path: origin.to_path_buf(),
        source,
      })?,
    };

    Self::from_raw(raw, origin, config_dir)
  }

  fn from_raw(raw: RawConfig, origin: &Path, config_dir: &Path) -> Result<Self, ConfigError> {
    let auto_fix = raw
      .fix
      .iter()
      .map(|name| name.parse::<Category>())
      .collect::<Result<BTreeSet<_>, _>>()
      .map_err(|source| ConfigError::InvalidFixCategory {
        path: origin.to_path_buf(),
        source,
      })?;

    if raw.configs.is_empty() {
      return Err(ConfigError::NoRoots {
        path: origin.to_path_buf(),
      });
    }

    for root in &raw.configs {
      validate_root(root)?;
    }

    let base_path = match raw.base_path {
      Some(base) => config_dir.join(base),
      None => config_dir.to_path_buf(),
    };

    let report_folder = base_path.join(raw.report_folder.unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_FOLDER)));
    let license_path = base_path.join(raw.license_path.unwrap_or_else(|| PathBuf::from(DEFAULT_LICENSE_PATH)));
    let roots = raw.configs.into_iter().map(|root| root.resolve(&base_path)).collect();

    Ok(Self {
      base_path,
      report_folder,
      license_path,
      auto_fix,
      print_checking: raw.print_checking,
      print_reports: raw.print_reports,
      roots,
    })
  }
}

/// Checks that a root's comment tokens can delimit a header.
fn validate_root(root: &RootConfig) -> Result<(), ConfigError> {
  let invalid = |message: &str| ConfigError::InvalidCommentStyle {
    dir: root.dir.clone(),
    message: message.to_string(),
  };

  if root.start_token.trim().is_empty() {
    return Err(invalid("startMultiComm cannot be empty"));
  }
  if root.end_token.trim().is_empty() {
    return Err(invalid("endMultiComm cannot be empty"));
  }
  if root.file_extensions.is_empty() {
    return Err(invalid("fileExtensions cannot be empty"));
  }

  Ok(())
}

/// Discover the configuration file path.
///
/// The configuration file is discovered in the following order:
/// 1. Path specified via `--config` flag (passed as `explicit_path`)
/// 2. Path specified via `LICENSE_CHECKER_CONFIG` environment variable
/// 3. `license-checker.json` or `license-checker.toml` in `current_dir`
pub fn discover_config_path(explicit_path: Option<&Path>, current_dir: &Path) -> Option<PathBuf> {
  if let Some(path) = explicit_path {
    verbose_log!("Using explicit config path: {}", path.display());
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
    let path = PathBuf::from(&env_path);
    if path.exists() {
      verbose_log!("Using config from {}: {}", CONFIG_ENV_VAR, path.display());
      return Some(path);
    }
    verbose_log!("{} path does not exist: {}", CONFIG_ENV_VAR, env_path);
  }

  for name in DEFAULT_CONFIG_FILENAMES {
    let candidate = current_dir.join(name);
    if candidate.exists() {
      verbose_log!("Using config: {}", candidate.display());
      return Some(candidate);
    }
  }

  verbose_log!("No config file found");
  None
}

/// Discover and load the configuration.
///
/// An explicit path that does not exist is reported as a read error rather
/// than silently ignored.
pub fn load_config(explicit_path: Option<&Path>) -> Result<Config> {
  let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
  let path = discover_config_path(explicit_path, &current_dir).ok_or(ConfigError::NotFound)?;
  Ok(Config::load(&path)?)
}

#[cfg(test)]
mod tests {
  use tempfile::TempDir;

  use super::*;

  const JSON_CONFIG: &str = r#"{
    "basePath": "repo",
    "reportFolder": "out/reports",
    "licensePath": "LICENSE_HEADER.txt",
    "fix": ["OUTDATED", "NO_LICENSE"],
    "printChecking": true,
    "configs": [
      {
        "dir": "src",
        "fileExtensions": [".js"],
        "startMultiComm": "/*",
        "endMultiComm": " */",
        "prefix": " *",
        "ignoreListDir": ["src/vendor"],
        "ignoreListDirName": ["node_modules"],
        "ignoreListFile": ["src/generated.js"]
      }
    ]
  }"#;

  fn parse_json(content: &str) -> Result<Config, ConfigError> {
    Config::parse(content, ConfigFormat::Json, Path::new("config.json"), Path::new("/work"))
  }

  #[test]
  fn test_parse_json_config() {
    let config = parse_json(JSON_CONFIG).expect("valid config should parse");

    assert_eq!(config.base_path, PathBuf::from("/work/repo"));
    assert_eq!(config.report_folder, PathBuf::from("/work/repo/out/reports"));
    assert_eq!(config.license_path, PathBuf::from("/work/repo/LICENSE_HEADER.txt"));
    assert!(config.print_checking);
    assert!(!config.print_reports);
    assert_eq!(
      config.auto_fix,
      BTreeSet::from([Category::Outdated, Category::NoHeader])
    );

    let root = &config.roots[0];
    assert_eq!(root.dir, PathBuf::from("/work/repo/src"));
    assert_eq!(root.ignore.dir_paths, vec![PathBuf::from("/work/repo/src/vendor")]);
    assert_eq!(root.ignore.dir_names, vec!["node_modules".to_string()]);
    assert_eq!(root.ignore.file_paths, vec![PathBuf::from("/work/repo/src/generated.js")]);
    assert_eq!(root.comment_style(), CommentStyle::new("/*", " */", " *"));
  }

  #[test]
  fn test_parse_toml_config() {
    let content = concat!(
      "reportFolder = \"reports\"\n",
      "\n",
      "[[configs]]\n",
      "dir = \"lib\"\n",
      "fileExtensions = [\"py\"]\n",
      "startMultiComm = '\"\"\"'\n",
      "endMultiComm = '\"\"\"'\n",
    );

    let config =
      Config::parse(content, ConfigFormat::Toml, Path::new("c.toml"), Path::new("/work")).expect("valid toml");

    assert_eq!(config.base_path, PathBuf::from("/work"));
    assert_eq!(config.license_path, PathBuf::from("/work/license_template.txt"));
    assert!(config.auto_fix.is_empty());
    assert_eq!(config.roots[0].prefix, "");
    assert_eq!(config.roots[0].start_token, "\"\"\"");
  }

  #[test]
  fn test_defaults_when_optional_keys_missing() {
    let content = r#"{"configs": [{"dir": ".", "fileExtensions": [".rs"], "startMultiComm": "/*", "endMultiComm": "*/"}]}"#;
    let config = parse_json(content).expect("valid config");

    assert_eq!(config.base_path, PathBuf::from("/work"));
    assert_eq!(config.report_folder, PathBuf::from("/work/license_reports"));
    assert!(config.roots[0].ignore.dir_names.is_empty());
  }

  #[test]
  fn test_unknown_fix_category_fails() {
    let content = JSON_CONFIG.replace("\"NO_LICENSE\"", "\"MISSING\"");
    let err = parse_json(&content).expect_err("should fail");

    assert!(matches!(err, ConfigError::InvalidFixCategory { .. }));
    let message = err.to_string();
    assert!(message.contains("MISSING"));
    assert!(message.contains("INVALID_LICENSE"));
  }

  #[test]
  fn test_empty_fix_list_means_prompt() {
    let content = JSON_CONFIG.replace("[\"OUTDATED\", \"NO_LICENSE\"]", "[]");
    let config = parse_json(&content).expect("valid config");

    assert!(config.auto_fix.is_empty());
  }

  #[test]
  fn test_empty_start_token_fails() {
    let content = JSON_CONFIG.replace("\"startMultiComm\": \"/*\"", "\"startMultiComm\": \"\"");
    let err = parse_json(&content).expect_err("should fail");

    assert!(matches!(err, ConfigError::InvalidCommentStyle { .. }));
  }

  #[test]
  fn test_missing_roots_fails() {
    let err = parse_json(r#"{"reportFolder": "r"}"#).expect_err("should fail");
    assert!(matches!(err, ConfigError::NoRoots { .. }));
  }

  #[test]
  fn test_invalid_json_fails() {
    let err = parse_json("{ not json").expect_err("should fail");
    assert!(matches!(err, ConfigError::JsonError { .. }));
  }

  #[test]
  fn test_load_resolves_base_against_config_dir() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("license-checker.json");
    std::fs::write(&config_path, JSON_CONFIG).expect("write config");

    let config = Config::load(&config_path).expect("load should succeed");
    assert_eq!(config.base_path, temp_dir.path().join("repo"));
  }

  #[test]
  fn test_load_config_file_not_found() {
    let result = Config::load(Path::new("/nonexistent/path/license-checker.json"));
    assert!(matches!(result.expect_err("should fail"), ConfigError::ReadError { .. }));
  }

  #[test]
  fn test_discover_config_explicit_path() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("custom.json");

    let result = discover_config_path(Some(&config_path), temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_discover_config_in_current_dir() {
    let temp_dir = TempDir::new().expect("create temp dir");
    let config_path = temp_dir.path().join("license-checker.toml");
    std::fs::write(&config_path, "").expect("write config");

    let result = discover_config_path(None, temp_dir.path());
    assert_eq!(result, Some(config_path));
  }

  #[test]
  fn test_config_format_from_path() {
    assert_eq!(ConfigFormat::from_path(Path::new("a.toml")), ConfigFormat::Toml);
    assert_eq!(ConfigFormat::from_path(Path::new("a.json")), ConfigFormat::Json);
    assert_eq!(ConfigFormat::from_path(Path::new("config")), ConfigFormat::Json);
  }
}
