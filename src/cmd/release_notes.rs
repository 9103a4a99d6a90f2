use std::io::Write;

use crate::context::AppContext;
use crate::domain::prompt::AppIdentity;
use crate::domain::release_notes::{APP_STORE_LIMIT, ReleaseNotes};
use crate::domain::version::VersionResolver;
use crate::error::AppResult;
use crate::workflow::release_notes::{
    ReleaseNotesOutcome, collect_release_context, generate_release_notes,
};

const RULE_WIDTH: usize = 50;

pub async fn run<W: Write>(ctx: &AppContext, out: &mut W) -> AppResult<ReleaseNotesOutcome> {
    writeln!(out, "Analyzing commits since last release...")?;
    let release = collect_release_context(ctx, &VersionResolver::xcode_project()).await?;
    writeln!(out, "Last release: {}", release.marker)?;

    writeln!(out, "Generating release notes with Claude...")?;
    out.flush()?;
    let outcome = generate_release_notes(ctx, &release, &AppIdentity::trivit()).await?;

    print_notes(out, &outcome.notes)?;
    writeln!(out, "\nSaved to: {}", outcome.output_path.display())?;
    Ok(outcome)
}

fn print_notes<W: Write>(out: &mut W, notes: &ReleaseNotes) -> AppResult<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "GENERATED RELEASE NOTES:")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "{}", notes.text)?;
    writeln!(out, "{rule}")?;
    writeln!(
        out,
        "Character count: {} (limit: {APP_STORE_LIMIT})",
        notes.char_count()
    )?;
    Ok(())
}
