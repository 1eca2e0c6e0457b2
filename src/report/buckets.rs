//! Quality buckets.

use std::fmt;

use serde::Serialize;

use crate::constants::rating::{HIGH_THRESHOLD, MEDIUM_THRESHOLD};
use crate::types::{FileAnalysis, ProjectInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityBucket {
    High,
    Medium,
    Low,
}

impl QualityBucket {
    pub const ALL: [QualityBucket; 3] = [Self::High, Self::Medium, Self::Low];

    pub fn from_rating(rating: u8) -> Self {
        if rating >= HIGH_THRESHOLD {
            Self::High
        } else if rating >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Section title including the rating range
    pub fn title(&self) -> &'static str {
        match self {
            Self::High => "High Quality Files (8-10)",
            Self::Medium => "Medium Quality Files (4-7)",
            Self::Low => "Low Quality Files (0-3)",
        }
    }
}

impl fmt::Display for QualityBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Files of one bucket, in traversal order
pub fn files_in_bucket(
    project: &ProjectInfo,
    bucket: QualityBucket,
) -> Vec<(&str, &FileAnalysis)> {
    project
        .ratings()
        .filter(|(_, analysis)| QualityBucket::from_rating(analysis.rating) == bucket)
        .collect()
}

/// `basename - rating/10 - complexity`
pub fn bucket_entry(relative_path: &str, analysis: &FileAnalysis) -> String {
    let basename = relative_path.rsplit('/').next().unwrap_or(relative_path);
    format!(
        "{} - {}/10 - {}",
        basename, analysis.rating, analysis.complexity
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rated(rating: u8) -> FileAnalysis {
        FileAnalysis {
            rating,
            complexity: "O(n)".to_string(),
            explanation: String::new(),
            suggestions: String::new(),
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(QualityBucket::from_rating(10), QualityBucket::High);
        assert_eq!(QualityBucket::from_rating(8), QualityBucket::High);
        assert_eq!(QualityBucket::from_rating(7), QualityBucket::Medium);
        assert_eq!(QualityBucket::from_rating(4), QualityBucket::Medium);
        assert_eq!(QualityBucket::from_rating(3), QualityBucket::Low);
        assert_eq!(QualityBucket::from_rating(0), QualityBucket::Low);
    }

    #[test]
    fn test_bucket_entry_uses_basename() {
        assert_eq!(bucket_entry("src/deep/util.rs", &rated(7)), "util.rs - 7/10 - O(n)");
        assert_eq!(bucket_entry("main.py", &rated(9)), "main.py - 9/10 - O(n)");
    }

    #[test]
    fn test_files_in_bucket_keep_traversal_order() {
        let mut info = ProjectInfo::new("/tmp/p", "p");
        info.record_file("z.rs", rated(9));
        info.record_file("m.rs", rated(2));
        info.record_file("a.rs", rated(8));

        let high: Vec<&str> = files_in_bucket(&info, QualityBucket::High)
            .into_iter()
            .map(|(path, _)| path)
            .collect();
        assert_eq!(high, vec!["z.rs", "a.rs"]);
        assert_eq!(files_in_bucket(&info, QualityBucket::Medium).len(), 0);
    }

    proptest! {
        #[test]
        fn prop_every_rating_lands_in_one_bucket(rating in 0u8..=10) {
            let bucket = QualityBucket::from_rating(rating);
            let expected = match rating {
                8..=10 => QualityBucket::High,
                4..=7 => QualityBucket::Medium,
                _ => QualityBucket::Low,
            };
            prop_assert_eq!(bucket, expected);
        }
    }
}
