use crate::clickup::PageProgress;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner} {prefix:.bold} {wide_msg}";
const TICK: Duration = Duration::from_millis(100);

pub struct ProgressStyleTemplate;

impl ProgressStyleTemplate {
    pub fn spinner() -> ProgressStyle {
        ProgressStyle::with_template(SPINNER_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

pub trait MultiProgressExt {
    fn add_spinner(&self, prefix: impl Into<String>) -> ProgressBar;
}

impl MultiProgressExt for MultiProgress {
    fn add_spinner(&self, prefix: impl Into<String>) -> ProgressBar {
        let pb = self.add(ProgressBar::new_spinner());
        pb.set_style(ProgressStyleTemplate::spinner());
        pb.set_prefix(prefix.into());
        pb.enable_steady_tick(TICK);
        pb
    }
}

/// Reports list paging on `pb`.
pub fn page_reporter<'a>(pb: ProgressBar) -> PageProgress<'a> {
    Box::new(move |page| pb.set_message(format!("Fetch tasks (#{} page) ...", page + 1)))
}
