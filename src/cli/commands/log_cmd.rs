//! log command - Fetch and display the commit log of a repository

use anyhow::Result;
use serde::Serialize;

use super::Context;
use crate::core::types::{Commit, RepoInfo, Stats};
use crate::store::RepoStore;
use crate::ui::output;

/// JSON shape of `gitscope log --json`.
#[derive(Debug, Serialize)]
struct LogReport<'a> {
    repository: Option<&'a RepoInfo>,
    stats: Option<&'a Stats>,
    authors: Vec<String>,
    commits: &'a [Commit],
}

/// Fetch the log and repository info, then print them.
pub fn log(
    ctx: &Context,
    repo: Option<String>,
    max_count: Option<i64>,
    by_date: bool,
    authors: bool,
) -> Result<()> {
    let store = ctx.store()?;
    store.set_repo_config(ctx.repo_config(repo, max_count)?);

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(store.load_data())?;

    if ctx.json {
        print_json(&store)
    } else if authors {
        output::print(output::format_list(&store.author_list(), ""), ctx.verbosity);
        Ok(())
    } else {
        print_text(ctx, &store, by_date);
        Ok(())
    }
}

fn print_json(store: &RepoStore) -> Result<()> {
    let state = store.snapshot();
    let report = LogReport {
        repository: state.repo_info.as_ref(),
        stats: state.stats.as_ref(),
        authors: state.author_list(),
        commits: &state.commits,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn print_text(ctx: &Context, store: &RepoStore, by_date: bool) {
    let state = store.snapshot();

    if let Some(info) = &state.repo_info {
        output::print(output::format_repo_info(info), ctx.verbosity);
        output::print("", ctx.verbosity);
    }

    if !state.has_data() {
        output::print("no commits", ctx.verbosity);
        return;
    }

    if by_date {
        for (date, commits) in state.commits_by_date() {
            output::print(format!("{} ({})", date, commits.len()), ctx.verbosity);
            let lines: Vec<String> = commits.iter().map(output::format_commit).collect();
            output::print(output::format_list(&lines, "  "), ctx.verbosity);
        }
    } else {
        for commit in &state.commits {
            output::print(output::format_commit(commit), ctx.verbosity);
        }
    }

    if let Some(stats) = &state.stats {
        output::print("", ctx.verbosity);
        output::print(
            output::format_stats(stats, state.time_range().as_ref()),
            ctx.verbosity,
        );
    }
}
