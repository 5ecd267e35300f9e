//! # Library API tests
//!
//! End-to-end runs through the public API: load a config, check, report, fix.

mod common;

use std::fs;

use anyhow::Result;
use common::{python_header, write_file, write_python_project, write_scenario_sources};
use license_checker::config::Config;
use license_checker::prompt::Confirm;
use license_checker::processor::{FixSelection, Processor, select_fixes};
use license_checker::report::{Category, ReportWriter};
use license_checker::templates::TemplateManager;
use tempfile::TempDir;

struct NeverAsked;

impl Confirm for NeverAsked {
  fn confirm(&mut self, question: &str) -> Result<bool> {
    panic!("unexpected prompt: {question}");
  }
}

fn load(dir: &TempDir) -> Result<(Config, TemplateManager)> {
  let config = Config::load(&dir.path().join("license-checker.json"))?;
  let templates = TemplateManager::load_template(&config.license_path)?;
  Ok((config, templates))
}

#[test]
fn test_scenario_reports_missing_and_outdated() -> Result<()> {
  let temp_dir = TempDir::new()?;
  write_python_project(temp_dir.path(), &["OUTDATED"])?;
  write_scenario_sources(temp_dir.path())?;
  let (config, mut templates) = load(&temp_dir)?;

  let processor = Processor::new(&config, &mut templates);
  let outcome = processor.check();

  assert_eq!(outcome.files_checked, 3);
  let found: Vec<(String, Category)> = outcome
    .findings
    .iter()
    .map(|f| (f.path.strip_prefix(temp_dir.path()).map(|p| p.to_string_lossy().to_string()).unwrap_or_default(), f.category))
    .collect();
  assert_eq!(
    found,
    vec![
      ("src/a.py".to_string(), Category::NoHeader),
      ("src/c.py".to_string(), Category::Outdated),
    ]
  );

  ReportWriter::new(&config.report_folder, &config.base_path).write(&outcome.findings)?;
  let outdated = fs::read_to_string(temp_dir.path().join("reports/OUTDATED.txt"))?;
  assert_eq!(
    outdated,
    "src/c.py: Detected license is outdated. Found date 2019-2021, expected 2019-2024.\n"
  );
  let missing = fs::read_to_string(temp_dir.path().join("reports/NO_LICENSE.txt"))?;
  assert_eq!(missing, "src/a.py: The license was not found. .\n");
  Ok(())
}

#[test]
fn test_scenario_auto_fix_rewrites_only_outdated() -> Result<()> {
  let temp_dir = TempDir::new()?;
  write_python_project(temp_dir.path(), &["OUTDATED"])?;
  write_scenario_sources(temp_dir.path())?;
  let (config, mut templates) = load(&temp_dir)?;
  let b_before = fs::read_to_string(temp_dir.path().join("src/b.py"))?;

  let processor = Processor::new(&config, &mut templates);
  let outcome = processor.check();
  let selection = select_fixes(&config.auto_fix, &mut NeverAsked)?;
  assert_eq!(selection, FixSelection::Only([Category::Outdated].into()));

  let fixed = processor.fix(selection.select(&outcome.findings));
  assert_eq!(fixed.fixed, 1);
  assert_eq!(fixed.failed, 0);

  assert_eq!(fs::read_to_string(temp_dir.path().join("src/a.py"))?, "print('a')\n");
  assert_eq!(fs::read_to_string(temp_dir.path().join("src/b.py"))?, b_before);
  assert_eq!(
    fs::read_to_string(temp_dir.path().join("src/c.py"))?,
    format!("{}print('c')\n", python_header("2019-2024"))
  );
  Ok(())
}

#[test]
fn test_fix_everything_then_recheck_passes() -> Result<()> {
  let temp_dir = TempDir::new()?;
  write_python_project(temp_dir.path(), &[])?;
  write_scenario_sources(temp_dir.path())?;
  write_file(
    temp_dir.path(),
    "src/pkg/d.py",
    "\"\"\"\n Copyright 2019-2024 ACME Corp\n\"\"\"\nimport os\n",
  )?;
  write_file(temp_dir.path(), "src/pkg/e.py", "\"\"\"\n Some other text\n\n Licensed under the Apache License, Version 2.0.\n\n\"\"\"\nx = 1\n")?;
  let (config, mut templates) = load(&temp_dir)?;

  let processor = Processor::new(&config, &mut templates);
  let outcome = processor.check();
  let categories: Vec<Category> = outcome.findings.iter().map(|f| f.category).collect();
  assert_eq!(
    categories,
    vec![Category::NoHeader, Category::Outdated, Category::LengthMismatch, Category::InvalidHeader]
  );

  let fixed = processor.fix(FixSelection::All.select(&outcome.findings));
  assert_eq!(fixed.fixed, 4);

  let recheck = processor.check();
  assert!(recheck.findings.is_empty());
  assert_eq!(recheck.files_checked, 5);
  assert!(fs::read_to_string(temp_dir.path().join("src/pkg/d.py"))?.ends_with("\"\"\"\nimport os\n"));
  Ok(())
}

#[test]
fn test_ignored_directories_are_not_checked() -> Result<()> {
  let temp_dir = TempDir::new()?;
  write_python_project(temp_dir.path(), &[])?;
  write_file(temp_dir.path(), "src/__pycache__/cached.py", "x = 1\n")?;
  write_file(temp_dir.path(), "src/ok.py", &python_header("2019-2024"))?;
  let (config, mut templates) = load(&temp_dir)?;

  let outcome = Processor::new(&config, &mut templates).check();

  assert_eq!(outcome.files_checked, 1);
  assert!(outcome.findings.is_empty());
  Ok(())
}

#[test]
fn test_ignored_dir_path_fragment_excludes_nested_directory() -> Result<()> {
  let temp_dir = TempDir::new()?;
  write_file(temp_dir.path(), "license_template.txt", common::TEMPLATE)?;
  write_file(
    temp_dir.path(),
    "license-checker.json",
    r#"{"configs": [{"dir": "src", "fileExtensions": [".py"], "startMultiComm": "\"\"\"", "endMultiComm": "\"\"\"", "ignoreListDir": ["vendor"]}]}"#,
  )?;
  write_file(temp_dir.path(), "src/keep.py", &python_header("2019-2024"))?;
  write_file(temp_dir.path(), "src/vendor/x.py", "x = 1\n")?;
  let (config, mut templates) = load(&temp_dir)?;

  let outcome = Processor::new(&config, &mut templates).check();

  assert_eq!(outcome.files_checked, 1);
  assert!(outcome.findings.is_empty());
  Ok(())
}
