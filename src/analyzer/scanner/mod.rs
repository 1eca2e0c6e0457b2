pub mod ignore_filter;
pub mod walker;

pub use ignore_filter::IgnoreFilter;
pub use walker::{TreeWalker, count_lines};
