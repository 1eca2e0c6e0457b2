//! AI Response Validation
//!
//! Best-effort extraction of structured data from free-form LLM responses.

mod json_extract;

pub use json_extract::{extract_json_object, parse_json_object};
