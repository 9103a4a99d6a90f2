use std::fs;
use std::path::{Path, PathBuf};

use crate::context::AppContext;
use crate::domain::change::ChangeSummary;
use crate::domain::history::{CommitHistory, ReleaseMarker};
use crate::domain::prompt::{AppIdentity, ReleasePrompt};
use crate::domain::release_notes::{self, ReleaseNotes};
use crate::domain::version::{AppVersion, VersionResolver};
use crate::error::AppResult;

/// Everything gathered from the repository before the model is called.
#[derive(Debug, Clone)]
pub struct ReleaseContext {
    pub repo_root: PathBuf,
    pub marker: ReleaseMarker,
    pub history: CommitHistory,
    pub changes: ChangeSummary,
    pub version: AppVersion,
}

impl ReleaseContext {
    pub fn prompt(&self, app: &AppIdentity) -> String {
        ReleasePrompt {
            app,
            version: &self.version,
            marker: &self.marker,
            commits: self.history.commits(),
            changes: &self.changes,
        }
        .render()
    }
}

pub struct ReleaseNotesOutcome {
    pub notes: ReleaseNotes,
    pub output_path: PathBuf,
}

pub async fn collect_release_context(
    ctx: &AppContext,
    resolver: &VersionResolver,
) -> AppResult<ReleaseContext> {
    let vcs = &ctx.version_control;

    let repo_root = vcs.repository_root().await?;
    let marker = vcs.last_release_marker().await?;
    let history = vcs.commits_since(&marker).await?;
    let changed_files = vcs.changed_files_since(&marker).await;
    let changes = ChangeSummary::from_paths(changed_files.paths());
    let version = resolver.resolve(&repo_root)?;

    tracing::info!(
        marker = %marker,
        commits = history.commits().len(),
        fallback = history.is_fallback(),
        files = changes.files_changed,
        version = version.as_str(),
        version_source = ?version.source,
        "collected release context"
    );

    Ok(ReleaseContext {
        repo_root,
        marker,
        history,
        changes,
        version,
    })
}

pub async fn generate_release_notes(
    ctx: &AppContext,
    release: &ReleaseContext,
    app: &AppIdentity,
) -> AppResult<ReleaseNotesOutcome> {
    let prompt = release.prompt(app);
    tracing::info!(model = %ctx.config.model, "drafting release notes");
    let notes = ctx.language_model.draft_release_notes(&prompt).await?;

    let output_path = release_notes::output_path(&release.repo_root);
    save_release_notes(&output_path, &notes)?;

    Ok(ReleaseNotesOutcome { notes, output_path })
}

pub fn save_release_notes(path: &Path, notes: &ReleaseNotes) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &notes.text)?;
    tracing::debug!(path = %path.display(), "release notes written");
    Ok(())
}
