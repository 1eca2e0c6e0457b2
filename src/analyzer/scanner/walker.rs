//! Tree Walker
//!
//! Pre-order traversal on `ignore::WalkBuilder` with its built-in filters
//! turned off, so only [`IgnoreFilter`] decides what is skipped. Ignored
//! directories are pruned through `filter_entry`; a subtree is fully visited
//! before the next sibling, in directory-listing order.

use std::path::{Path, PathBuf};

use ignore::{DirEntry, WalkBuilder};
use tracing::{debug, info, warn};

use super::IgnoreFilter;
use crate::analyzer::content::ContentAnalyzer;
use crate::analyzer::language::Language;
use crate::types::{FileAnalysis, ProjectInfo};

pub struct TreeWalker<'a> {
    root: &'a Path,
    filter: &'a IgnoreFilter,
    analyzer: &'a ContentAnalyzer,
}

impl<'a> TreeWalker<'a> {
    pub fn new(root: &'a Path, filter: &'a IgnoreFilter, analyzer: &'a ContentAnalyzer) -> Self {
        Self {
            root,
            filter,
            analyzer,
        }
    }

    /// Visit every non-ignored entry under the root, accumulating into `info`.
    ///
    /// Files are analyzed one at a time, in directory-listing order. A
    /// failing file or directory is logged and the walk continues.
    pub async fn walk(&self, info: &mut ProjectInfo) {
        let filter = self.filter.clone();
        let root = self.root.to_path_buf();

        let walk = WalkBuilder::new(self.root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let Some(relative) = relative_path(&root, entry.path()) else {
                    return true;
                };
                let ignored = filter.is_ignored(&relative, is_dir(entry));
                if ignored {
                    debug!("Skipping ignored path: {}", relative);
                }
                !ignored
            })
            .build();

        let mut file_index = 0usize;

        for result in walk {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Walk error: {}", e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let Some(relative) = relative_path(self.root, entry.path()) else {
                continue;
            };

            match entry.file_type() {
                Some(ft) if ft.is_symlink() => {
                    debug!("Skipping symbolic link: {}", relative);
                }
                Some(ft) if ft.is_dir() => {
                    info.record_directory();
                }
                Some(ft) if ft.is_file() => {
                    file_index += 1;
                    info!("[{}] Analyzing {}", file_index, relative);
                    self.visit_file(entry.into_path(), relative, info).await;
                }
                _ => {
                    debug!("Skipping special file: {}", relative);
                }
            }
        }
    }

    async fn visit_file(&self, path: PathBuf, relative: String, info: &mut ProjectInfo) {
        let language = Language::from_path(&path);
        info.record_file_seen(language.as_str());

        let analysis = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                info.add_lines(count_lines(&content));
                self.analyzer.analyze(&relative, language, &content).await
            }
            Err(e) => {
                warn!("Failed to read {}: {}", relative, e);
                FileAnalysis::processing_error()
            }
        };

        info.record_file(relative, analysis);
    }
}

/// Number of `\n`-delimited segments: `""` is 1, `"a\n"` is 2.
pub fn count_lines(content: &str) -> usize {
    content.split('\n').count()
}

fn is_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
}

/// `/`-joined path below `root`; `None` for the root itself.
fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
