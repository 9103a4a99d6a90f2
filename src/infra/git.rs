use std::path::PathBuf;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::commit::{self, LOG_FORMAT};
use crate::domain::history::{ChangedFiles, CommitHistory, RECENT_COMMIT_LIMIT, ReleaseMarker};
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn run(&self, args: &[&str]) -> AppResult<String> {
        tracing::debug!(?args, "running git");
        let output = Command::new("git")
            .arg("--no-pager")
            .args(args)
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::VersionControl(format!(
                "git {} failed: {}",
                args.join(" "),
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn repository_root(&self) -> AppResult<PathBuf> {
        let output = self.run(&["rev-parse", "--show-toplevel"]).await?;
        Ok(PathBuf::from(output.trim()))
    }

    async fn last_release_marker(&self) -> AppResult<ReleaseMarker> {
        match self.run(&["describe", "--tags", "--abbrev=0"]).await {
            Ok(output) => Ok(ReleaseMarker::Tag(output.trim().to_string())),
            Err(err) => {
                tracing::info!(%err, "no release tag found, using root commit");
                let output = self.run(&["rev-list", "--max-parents=0", "HEAD"]).await?;
                Ok(ReleaseMarker::root_commit(&output))
            }
        }
    }

    async fn commits_since(&self, marker: &ReleaseMarker) -> AppResult<CommitHistory> {
        let range = marker.range_to_head();
        match self
            .run(&["log", &range, LOG_FORMAT, "--date=short"])
            .await
        {
            Ok(output) => Ok(CommitHistory::SinceMarker(commit::parse_log(&output))),
            Err(err) => {
                tracing::warn!(%err, "range query failed, using recent commits");
                let limit = format!("-{RECENT_COMMIT_LIMIT}");
                let output = self
                    .run(&["log", &limit, LOG_FORMAT, "--date=short"])
                    .await?;
                Ok(CommitHistory::Recent(commit::parse_log(&output)))
            }
        }
    }

    async fn changed_files_since(&self, marker: &ReleaseMarker) -> ChangedFiles {
        let range = marker.range_to_head();
        match self.run(&["diff", "--name-only", &range]).await {
            Ok(output) => ChangedFiles::from_name_only_output(&output),
            Err(err) => {
                tracing::warn!(%err, "could not list changed files");
                ChangedFiles::Unavailable
            }
        }
    }
}
