use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppError, AppResult};

pub const DEFAULT_VERSION: &str = "1.0.0";

static PLIST_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<key>CFBundleShortVersionString</key>\s*<string>(\d+\.\d+\.\d+)</string>")
        .expect("Should compile: PLIST_VERSION_RE")
});

static MARKETING_VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"MARKETING_VERSION\s*=\s*(\d+\.\d+\.\d+)")
        .expect("Should compile: MARKETING_VERSION_RE")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    File(PathBuf),
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppVersion {
    pub value: String,
    pub source: VersionSource,
}

impl AppVersion {
    pub fn fallback() -> Self {
        Self {
            value: DEFAULT_VERSION.to_string(),
            source: VersionSource::Default,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// Where a strategy looks for candidate files, relative to the repository root.
#[derive(Debug, Clone)]
pub enum ConfigLocator {
    /// Files matching a glob such as `Trivit/**/Info.plist`, in path order.
    Glob(&'static str),
    Exact(&'static str),
}

impl ConfigLocator {
    fn candidates(&self, repo_root: &Path) -> AppResult<Vec<PathBuf>> {
        match self {
            ConfigLocator::Glob(relative) => {
                let root = glob::Pattern::escape(&repo_root.to_string_lossy());
                let pattern = format!("{}/{relative}", root.trim_end_matches('/'));
                let entries = glob::glob(&pattern).map_err(|err| {
                    AppError::Configuration(format!("invalid pattern {pattern}: {err}"))
                })?;

                Ok(entries
                    .filter_map(|entry| match entry {
                        Ok(path) => Some(path),
                        Err(err) => {
                            tracing::debug!(%err, "skipping unreadable path");
                            None
                        }
                    })
                    .filter(|path| path.is_file())
                    .collect())
            }
            ConfigLocator::Exact(relative) => {
                let path = repo_root.join(relative);
                Ok(if path.is_file() { vec![path] } else { Vec::new() })
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct VersionStrategy {
    pub locator: ConfigLocator,
    pub pattern: Regex,
}

impl VersionStrategy {
    fn find(&self, repo_root: &Path) -> AppResult<Option<AppVersion>> {
        for path in self.locator.candidates(repo_root)? {
            let content = fs::read_to_string(&path).map_err(|err| {
                AppError::Configuration(format!("failed to read {}: {err}", path.display()))
            })?;
            if let Some(captures) = self.pattern.captures(&content) {
                tracing::debug!(path = %path.display(), "version found");
                return Ok(Some(AppVersion {
                    value: captures[1].to_string(),
                    source: VersionSource::File(path),
                }));
            }
        }
        Ok(None)
    }
}

/// Ordered version lookup; the first strategy to match wins.
#[derive(Debug, Clone)]
pub struct VersionResolver {
    strategies: Vec<VersionStrategy>,
}

impl VersionResolver {
    pub fn new(strategies: Vec<VersionStrategy>) -> Self {
        Self { strategies }
    }

    pub fn xcode_project() -> Self {
        Self::new(vec![
            VersionStrategy {
                locator: ConfigLocator::Glob("Trivit/**/Info.plist"),
                pattern: PLIST_VERSION_RE.clone(),
            },
            VersionStrategy {
                locator: ConfigLocator::Exact("Trivit.xcodeproj/project.pbxproj"),
                pattern: MARKETING_VERSION_RE.clone(),
            },
        ])
    }

    pub fn resolve(&self, repo_root: &Path) -> AppResult<AppVersion> {
        for strategy in &self.strategies {
            if let Some(version) = strategy.find(repo_root)? {
                return Ok(version);
            }
        }
        tracing::debug!("no version found, using {DEFAULT_VERSION}");
        Ok(AppVersion::fallback())
    }
}
