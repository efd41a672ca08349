mod progress;

pub use progress::{page_reporter, MultiProgressExt, ProgressStyleTemplate};
