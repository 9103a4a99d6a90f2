use async_trait::async_trait;

use crate::domain::release_notes::ReleaseNotes;
use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn draft_release_notes(&self, prompt: &str) -> AppResult<ReleaseNotes>;
}
