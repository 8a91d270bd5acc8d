//! info command - Show repository identity
//!
//! Repository info is best effort: a failed fetch is logged by the store
//! and reported here as unavailable rather than as an error.

use anyhow::Result;

use super::Context;
use crate::ui::output;

/// Show name, current branch and remote of a repository.
pub fn info(ctx: &Context, repo: Option<String>) -> Result<()> {
    let store = ctx.store()?;
    store.set_repo_config(ctx.repo_config(repo, None)?);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(store.fetch_repo_info())?;

    match store.repo_info() {
        Some(info) if ctx.json => println!("{}", serde_json::to_string_pretty(&info)?),
        Some(info) => output::print(output::format_repo_info(&info), ctx.verbosity),
        None if ctx.json => println!("null"),
        None => output::print("repository info unavailable", ctx.verbosity),
    }
    Ok(())
}
