use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;
use tracing::{debug, warn};

use crate::constants::scan::PROJECT_CONFIG_DIR;

/// Gitignore-style predicate over root-relative paths.
///
/// Combines the patterns of the root-level ignore file with the default
/// exclusions. The ignore file itself and the project config directory are
/// also excluded so neither shows up as an analyzed file.
#[derive(Clone)]
pub struct IgnoreFilter {
    matcher: Gitignore,
}

impl IgnoreFilter {
    /// Load the filter for `root`.
    ///
    /// A missing ignore file means no extra patterns. Read errors and invalid
    /// lines are logged and skipped; the remaining patterns still apply.
    pub fn load<P: AsRef<Path>>(root: P, ignore_file: &str, default_excludes: &[String]) -> Self {
        let root = root.as_ref();
        let mut builder = GitignoreBuilder::new(root);

        for pattern in default_excludes {
            add_pattern(&mut builder, pattern);
        }
        add_pattern(&mut builder, &format!("/{}", ignore_file));

        let ignore_path = root.join(ignore_file);
        match std::fs::read_to_string(&ignore_path) {
            Ok(contents) => {
                let mut added = 0usize;
                for line in contents.lines() {
                    if add_pattern(&mut builder, line) {
                        added += 1;
                    }
                }
                debug!("Loaded {} pattern lines from {}", added, ignore_path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No ignore file at {}", ignore_path.display());
            }
            Err(e) => {
                warn!("Failed to read {}: {}", ignore_path.display(), e);
            }
        }
        // Last match wins: added after the file so a negation cannot re-include it
        add_project_config_pattern(&mut builder);

        let matcher = match builder.build() {
            Ok(matcher) => matcher,
            Err(e) => {
                warn!("Failed to build ignore matcher, using default exclusions only: {}", e);
                Self::defaults_only(root, default_excludes)
            }
        };

        Self { matcher }
    }

    fn defaults_only(root: &Path, default_excludes: &[String]) -> Gitignore {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in default_excludes {
            add_pattern(&mut builder, pattern);
        }
        add_project_config_pattern(&mut builder);
        builder.build().unwrap_or_else(|_| Gitignore::empty())
    }

    /// Whether a `/`-separated root-relative path is excluded.
    ///
    /// Only the path itself is tested; callers prune ignored directories so
    /// their contents are never asked about.
    pub fn is_ignored(&self, relative_path: &str, is_dir: bool) -> bool {
        self.matcher
            .matched(Path::new(relative_path), is_dir)
            .is_ignore()
    }

    pub fn pattern_count(&self) -> usize {
        self.matcher.num_ignores() as usize + self.matcher.num_whitelists() as usize
    }
}

fn add_project_config_pattern(builder: &mut GitignoreBuilder) {
    add_pattern(builder, &format!("/{}/", PROJECT_CONFIG_DIR));
}

/// Returns true when the line contributed a pattern.
fn add_pattern(builder: &mut GitignoreBuilder, line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }
    match builder.add_line(None, line.trim_end()) {
        Ok(_) => true,
        Err(e) => {
            warn!("Skipping invalid ignore pattern '{}': {}", line, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn defaults() -> Vec<String> {
        vec![".git/".to_string(), ".venv/".to_string()]
    }

    #[test]
    fn test_missing_ignore_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let filter = IgnoreFilter::load(dir.path(), ".gitignore", &defaults());

        assert!(filter.is_ignored(".git", true));
        assert!(filter.is_ignored(".venv", true));
        assert!(!filter.is_ignored("src", true));
        assert!(!filter.is_ignored("main.py", false));
    }

    #[test]
    fn test_directory_marker_only_matches_directories() {
        let dir = TempDir::new().unwrap();
        let filter = IgnoreFilter::load(dir.path(), ".gitignore", &defaults());

        assert!(filter.is_ignored(".git", true));
        assert!(!filter.is_ignored(".git", false));
    }

    #[test]
    fn test_patterns_from_ignore_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(".gitignore"),
            "# build output\n*.log\n!keep.log\n/target\n\nnode_modules/\n",
        )
        .unwrap();
        let filter = IgnoreFilter::load(dir.path(), ".gitignore", &defaults());

        assert!(filter.is_ignored("b.log", false));
        assert!(filter.is_ignored("nested/debug.log", false));
        assert!(!filter.is_ignored("keep.log", false));
        assert!(filter.is_ignored("target", true));
        assert!(!filter.is_ignored("src/target", true));
        assert!(filter.is_ignored("web/node_modules", true));
        assert!(!filter.is_ignored("a.py", false));
    }

    #[test]
    fn test_ignore_file_itself_is_excluded() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "*.log\n").unwrap();
        let filter = IgnoreFilter::load(dir.path(), ".gitignore", &defaults());

        assert!(filter.is_ignored(".gitignore", false));
        assert!(!filter.is_ignored("sub/.gitignore", false));
    }

    #[test]
    fn test_project_config_dir_is_excluded() {
        let dir = TempDir::new().unwrap();
        let filter = IgnoreFilter::load(dir.path(), ".gitignore", &[]);

        assert!(filter.is_ignored(".codegrade", true));
        assert!(!filter.is_ignored("nested/.codegrade", true));
        assert!(!filter.is_ignored(".codegrade.py", false));
    }

    #[test]
    fn test_negation_cannot_reinclude_project_config_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "!.codegrade/
").unwrap();
        let filter = IgnoreFilter::load(dir.path(), ".gitignore", &defaults());

        assert!(filter.is_ignored(".codegrade", true));
    }

    #[test]
    fn test_custom_ignore_file_and_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".reviewignore"), "docs/\n").unwrap();
        let filter = IgnoreFilter::load(dir.path(), ".reviewignore", &["dist/".to_string()]);

        assert!(filter.is_ignored("docs", true));
        assert!(filter.is_ignored("dist", true));
        assert!(!filter.is_ignored(".git", true));
    }

    #[test]
    fn test_invalid_pattern_is_skipped() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "[\n*.tmp\n").unwrap();
        let filter = IgnoreFilter::load(dir.path(), ".gitignore", &defaults());

        assert!(filter.is_ignored("scratch.tmp", false));
        assert!(filter.pattern_count() >= 3);
    }
}
