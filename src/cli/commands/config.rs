//! Config Command
//!
//! Manage codegrade configuration.
//!
//! Usage:
//!   codegrade config show [-f text|json|yaml]
//!   codegrade config path
//!   codegrade config init [--force]

use std::io::Write;
use std::path::Path;

use crate::cli::ui::Output;
use crate::config::ConfigLoader;
use crate::types::Result;

/// Print the merged effective configuration
pub fn show(root: &Path, format: &str) -> Result<()> {
    let config = ConfigLoader::load(root)?;
    writeln!(std::io::stdout().lock(), "{}", ConfigLoader::render(&config, format)?)?;
    Ok(())
}

/// Print configuration file locations
pub fn path(root: &Path) -> Result<()> {
    let output = Output::new();
    output.section("Configuration paths");

    let mut out = std::io::stdout().lock();
    for (label, path, exists) in ConfigLoader::describe_paths(root) {
        let marker = if exists { "✓" } else { "✗" };
        match path {
            Some(path) => writeln!(
                out,
                "  {:<8} {} {}",
                format!("{}:", label),
                marker,
                path.display()
            )?,
            None => writeln!(out, "  {:<8} (not available)", format!("{}:", label))?,
        }
    }
    Ok(())
}

/// Write a commented project config template under `root`
pub fn init(root: &Path, force: bool) -> Result<()> {
    let canonical = root.canonicalize()?;
    let name = canonical.file_name().and_then(|n| n.to_str());

    let config_path = ConfigLoader::init_project(root, name, force)?;
    Output::new().success(&format!(
        "Initialized project configuration: {}",
        config_path.display()
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_uses_directory_name() {
        let parent = TempDir::new().unwrap();
        let root = parent.path().join("inventory");
        std::fs::create_dir(&root).unwrap();

        init(&root, false).unwrap();
        let written = std::fs::read_to_string(root.join(".codegrade/config.toml")).unwrap();
        assert!(written.contains("name = \"inventory\""));

        assert!(init(&root, false).is_err());
        assert!(init(&root, true).is_ok());
    }
}
