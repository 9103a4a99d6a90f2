use std::fmt;

use crate::domain::commit::Commit;

pub const ROOT_COMMIT_PREFIX_LEN: usize = 8;
pub const RECENT_COMMIT_LIMIT: usize = 50;

/// The point in history treated as the previous release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseMarker {
    Tag(String),
    /// Abbreviated hash of the repository's root commit, used when no tag exists.
    RootCommit(String),
}

impl ReleaseMarker {
    pub fn root_commit(hash: &str) -> Self {
        ReleaseMarker::RootCommit(hash.trim().chars().take(ROOT_COMMIT_PREFIX_LEN).collect())
    }

    pub fn as_str(&self) -> &str {
        match self {
            ReleaseMarker::Tag(name) | ReleaseMarker::RootCommit(name) => name,
        }
    }

    pub fn range_to_head(&self) -> String {
        format!("{}..HEAD", self.as_str())
    }
}

impl fmt::Display for ReleaseMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitHistory {
    SinceMarker(Vec<Commit>),
    /// The range query failed; these are the most recent commits on the branch.
    Recent(Vec<Commit>),
}

impl CommitHistory {
    pub fn commits(&self) -> &[Commit] {
        match self {
            CommitHistory::SinceMarker(commits) | CommitHistory::Recent(commits) => commits,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, CommitHistory::Recent(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangedFiles {
    Listed(Vec<String>),
    Unavailable,
}

impl ChangedFiles {
    pub fn from_name_only_output(output: &str) -> Self {
        ChangedFiles::Listed(
            output
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn paths(&self) -> &[String] {
        match self {
            ChangedFiles::Listed(paths) => paths,
            ChangedFiles::Unavailable => &[],
        }
    }
}
