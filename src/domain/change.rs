/// Changed-file counts grouped by the area of the app they touch. A path may
/// land in several buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub files_changed: usize,
    pub ios: usize,
    pub watch: usize,
    pub widget: usize,
    pub test: usize,
}

impl ChangeSummary {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_paths<S: AsRef<str>>(paths: &[S]) -> Self {
        let mut summary = Self::empty();
        for path in paths {
            let path = path.as_ref();
            summary.files_changed += 1;
            if is_ios(path) {
                summary.ios += 1;
            }
            if is_watch(path) {
                summary.watch += 1;
            }
            if path.contains("Widget") {
                summary.widget += 1;
            }
            if path.contains("Test") {
                summary.test += 1;
            }
        }
        summary
    }
}

fn is_ios(path: &str) -> bool {
    path.starts_with("Trivit/")
}

fn is_watch(path: &str) -> bool {
    path.contains("Watch") || path.contains("watchOS")
}
