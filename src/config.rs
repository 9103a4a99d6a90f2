use std::env;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

pub const API_KEY_VAR: &str = "ANTHROPIC_API_KEY";
pub const BASE_URL_VAR: &str = "ANTHROPIC_BASE_URL";

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
pub const MAX_OUTPUT_TOKENS: u32 = 500;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    /// Reads the process environment. Fails before any other work when the
    /// API key is absent.
    pub fn from_env(workspace_hint: &Path) -> AppResult<Self> {
        Self::from_lookup(workspace_hint, |key| env::var(key).ok())
    }

    pub fn from_lookup<F>(workspace_hint: &Path, lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(AppError::MissingCredential(API_KEY_VAR))?;

        let api_base_url = lookup(BASE_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            api_base_url,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: MAX_OUTPUT_TOKENS,
            workspace_root: workspace_hint.to_path_buf(),
        })
    }
}
