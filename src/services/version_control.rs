use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::history::{ChangedFiles, CommitHistory, ReleaseMarker};
use crate::error::AppResult;

/// History queries used to scope a release. Each operation reports which path
/// produced its answer.
#[async_trait]
pub trait VersionControlService: Send + Sync {
    async fn repository_root(&self) -> AppResult<PathBuf>;
    async fn last_release_marker(&self) -> AppResult<ReleaseMarker>;
    async fn commits_since(&self, marker: &ReleaseMarker) -> AppResult<CommitHistory>;
    /// Never fails; an unusable range yields `ChangedFiles::Unavailable`.
    async fn changed_files_since(&self, marker: &ReleaseMarker) -> ChangedFiles;
}
