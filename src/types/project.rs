//! Project-level accumulator
//!
//! `ProjectInfo` collects traversal statistics and per-file verdicts for one
//! analysis run. The ordered path list and the verdict map are only ever
//! mutated together through [`ProjectInfo::record_file`], which keeps them in
//! lockstep.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::analysis::FileAnalysis;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectInfo {
    root: PathBuf,
    name: String,
    file_count: usize,
    directory_count: usize,
    total_lines: usize,
    /// Language display name -> number of files
    languages: BTreeMap<String, usize>,
    /// Relative paths in traversal order
    files: Vec<String>,
    #[serde(skip)]
    ai_ratings: HashMap<String, FileAnalysis>,
}

impl ProjectInfo {
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
            file_count: 0,
            directory_count: 0,
            total_lines: 0,
            languages: BTreeMap::new(),
            files: Vec::new(),
            ai_ratings: HashMap::new(),
        }
    }

    // =========================================================================
    // Accumulation (used by the walker)
    // =========================================================================

    pub fn record_directory(&mut self) {
        self.directory_count += 1;
    }

    /// Count a discovered file under its language
    pub fn record_file_seen(&mut self, language: &str) {
        self.file_count += 1;
        *self.languages.entry(language.to_string()).or_insert(0) += 1;
    }

    pub fn add_lines(&mut self, lines: usize) {
        self.total_lines += lines;
    }

    /// Store the verdict for a file.
    ///
    /// The path is appended to the ordered list the first time it is seen;
    /// a repeated path replaces the earlier verdict in place.
    pub fn record_file(&mut self, relative_path: impl Into<String>, analysis: FileAnalysis) {
        let path = relative_path.into();
        if self.ai_ratings.insert(path.clone(), analysis).is_none() {
            self.files.push(path);
        }
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_count(&self) -> usize {
        self.file_count
    }

    pub fn directory_count(&self) -> usize {
        self.directory_count
    }

    pub fn total_lines(&self) -> usize {
        self.total_lines
    }

    pub fn languages(&self) -> &BTreeMap<String, usize> {
        &self.languages
    }

    /// Relative file paths in traversal order
    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn analysis(&self, relative_path: &str) -> Option<&FileAnalysis> {
        self.ai_ratings.get(relative_path)
    }

    /// Verdicts in traversal order
    pub fn ratings(&self) -> impl Iterator<Item = (&str, &FileAnalysis)> {
        self.files.iter().filter_map(|path| {
            self.ai_ratings
                .get(path)
                .map(|analysis| (path.as_str(), analysis))
        })
    }

    pub fn rating_count(&self) -> usize {
        self.ai_ratings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn sample(rating: u8) -> FileAnalysis {
        FileAnalysis {
            rating,
            complexity: "O(n)".to_string(),
            explanation: String::new(),
            suggestions: String::new(),
        }
    }

    #[test]
    fn test_counts_accumulate() {
        let mut info = ProjectInfo::new("/tmp/project", "project");
        info.record_directory();
        info.record_file_seen("Rust");
        info.record_file_seen("Rust");
        info.record_file_seen("Python");
        info.add_lines(10);
        info.add_lines(5);

        assert_eq!(info.directory_count(), 1);
        assert_eq!(info.file_count(), 3);
        assert_eq!(info.total_lines(), 15);
        assert_eq!(info.languages().get("Rust"), Some(&2));
        assert_eq!(info.languages().get("Python"), Some(&1));
    }

    #[test]
    fn test_ratings_follow_traversal_order() {
        let mut info = ProjectInfo::new("/tmp/project", "project");
        info.record_file("b.rs", sample(3));
        info.record_file("a.rs", sample(9));
        info.record_file("c/d.rs", sample(5));

        let order: Vec<&str> = info.ratings().map(|(path, _)| path).collect();
        assert_eq!(order, vec!["b.rs", "a.rs", "c/d.rs"]);
    }

    #[test]
    fn test_repeated_path_replaces_verdict() {
        let mut info = ProjectInfo::new("/tmp/project", "project");
        info.record_file("a.rs", sample(3));
        info.record_file("a.rs", sample(8));

        assert_eq!(info.files(), &["a.rs".to_string()]);
        assert_eq!(info.analysis("a.rs").map(|a| a.rating), Some(8));
    }

    proptest! {
        #[test]
        fn prop_files_and_ratings_stay_in_lockstep(
            paths in proptest::collection::vec("[a-c]{1,2}(/[a-c]{1,2})?\\.rs", 0..40)
        ) {
            let mut info = ProjectInfo::new("/tmp/project", "project");
            for path in &paths {
                info.record_file(path.clone(), sample(5));
            }

            let listed: HashSet<&str> = info.files().iter().map(String::as_str).collect();
            prop_assert_eq!(listed.len(), info.files().len());
            prop_assert_eq!(info.rating_count(), info.files().len());
            for path in info.files() {
                prop_assert!(info.analysis(path).is_some());
            }
        }
    }
}
