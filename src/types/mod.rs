pub mod analysis;
pub mod error;
pub mod project;
pub mod utils;

pub use analysis::{FileAnalysis, NOT_AVAILABLE, ProjectAnalysis};
pub use error::{CodeGradeError, ErrorCategory, ErrorClassifier, LlmError, Result};
pub use project::ProjectInfo;
pub use utils::{
    deserialize_rating, json_rating, json_string, json_string_or, json_text_or, preview,
    rating_from_value,
};
