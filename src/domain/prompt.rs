use crate::domain::change::ChangeSummary;
use crate::domain::commit::Commit;
use crate::domain::history::ReleaseMarker;
use crate::domain::version::AppVersion;

/// Only this many commits are listed in the prompt.
pub const PROMPT_COMMIT_LIMIT: usize = 50;

pub const FALLBACK_NOTES: &str = "Bug fixes and performance improvements.";

#[derive(Debug, Clone)]
pub struct AppIdentity {
    pub name: &'static str,
    pub tagline: &'static str,
}

impl AppIdentity {
    pub const fn trivit() -> Self {
        Self {
            name: "Trivit",
            tagline: "A simple and elegant counting app for tracking anything",
        }
    }
}

pub struct ReleasePrompt<'a> {
    pub app: &'a AppIdentity,
    pub version: &'a AppVersion,
    pub marker: &'a ReleaseMarker,
    pub commits: &'a [Commit],
    pub changes: &'a ChangeSummary,
}

impl ReleasePrompt<'_> {
    fn commit_bullets(&self) -> String {
        self.commits
            .iter()
            .take(PROMPT_COMMIT_LIMIT)
            .map(|commit| format!("- {} ({})", commit.subject, commit.date))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn render(&self) -> String {
        let AppIdentity { name, tagline } = self.app;
        let changes = self.changes;

        format!(
            "You are writing App Store release notes for {name} ({tagline}).

Version: {version}
Last release tag: {marker}

Commits since last release:
{commits}

Changed areas:
- iOS app changes: {ios} files
- Watch app changes: {watch} files
- Widget changes: {widget} files
- Test changes: {test} files

{STYLE_RULES}
For a counting app like {name}, focus on:
{FOCUS_AREAS}
If there are no significant user-facing changes, write something like:
\"{FALLBACK_NOTES}\"

Output ONLY the release notes text, no additional commentary.",
            version = self.version.as_str(),
            marker = self.marker,
            commits = self.commit_bullets(),
            ios = changes.ios,
            watch = changes.watch,
            widget = changes.widget,
            test = changes.test,
        )
    }
}

const STYLE_RULES: &str = "Write release notes that:
1. Are user-friendly (avoid technical jargon)
2. Focus on user-visible improvements
3. Are concise (under 500 characters for App Store limit)
4. Use bullet points for multiple changes
5. Start with most impactful changes
6. Group related changes together
7. Skip internal/technical changes users don't care about
8. Use emojis sparingly if at all
";

const FOCUS_AREAS: &str = "- UI/UX improvements
- New counting features
- Widget improvements
- Apple Watch updates
- Performance improvements
- Bug fixes that affect users
";
