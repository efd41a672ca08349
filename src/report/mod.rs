pub mod markdown;
pub mod members;

pub use markdown::MarkdownReport;
pub use members::members_table;
