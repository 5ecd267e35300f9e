#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// License text used by the fixtures.
pub const TEMPLATE: &str = "Copyright 2019-2024 ACME Corp\n\nLicensed under the Apache License, Version 2.0.\n";

/// A Python docstring header for the fixture template with the given year
/// range.
pub fn python_header(year_range: &str) -> String {
  format!(
    "\"\"\"\n Copyright {} ACME Corp\n\n Licensed under the Apache License, Version 2.0.\n\n\"\"\"\n",
    year_range
  )
}

/// Writes a file, creating parent directories as needed.
pub fn write_file(dir: &Path, relative: &str, content: &str) -> Result<PathBuf> {
  let path = dir.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  Ok(path)
}

/// Writes `license_template.txt` and a JSON config checking `.py` files under
/// `src` with the given `fix` list.
///
/// Returns the config path.
pub fn write_python_project(dir: &Path, fix: &[&str]) -> Result<PathBuf> {
  write_file(dir, "license_template.txt", TEMPLATE)?;

  let fix_list: Vec<String> = fix.iter().map(|f| format!("\"{}\"", f)).collect();
  let config = format!(
    r#"{{
  "reportFolder": "reports",
  "licensePath": "license_template.txt",
  "fix": [{}],
  "configs": [
    {{
      "dir": "src",
      "fileExtensions": [".py"],
      "startMultiComm": "\"\"\"",
      "endMultiComm": "\"\"\"",
      "prefix": "",
      "ignoreListDirName": ["__pycache__"]
    }}
  ]
}}
"#,
    fix_list.join(", ")
  );
  write_file(dir, "license-checker.json", &config)
}

/// Writes the three-file scenario: `a.py` without a header, `b.py` with the
/// correct header and `c.py` with an outdated year range.
pub fn write_scenario_sources(dir: &Path) -> Result<()> {
  write_file(dir, "src/a.py", "print('a')\n")?;
  write_file(dir, "src/b.py", &format!("{}print('b')\n", python_header("2019-2024")))?;
  write_file(dir, "src/c.py", &format!("{}print('c')\n", python_header("2019-2021")))?;
  Ok(())
}
