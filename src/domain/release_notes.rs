use std::path::{Path, PathBuf};

/// Location of the App Store metadata file, relative to the repository root.
pub const OUTPUT_RELATIVE_PATH: &str = "fastlane/metadata/en-US/release_notes.txt";

/// App Store Connect's limit for the "What's New" field.
pub const APP_STORE_LIMIT: usize = 4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseNotes {
    pub text: String,
}

impl ReleaseNotes {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

pub fn output_path(repo_root: &Path) -> PathBuf {
    repo_root.join(OUTPUT_RELATIVE_PATH)
}
