//! Purge session orchestration
//!
//! Sequences one bulk-delete run: agent probe, pre-sync, listing,
//! confirmation, batched deletion with progress accounting, post-sync.
//! Sync failures are warnings; everything before confirmation fails closed.

pub mod engine;

use crate::{agent::Agent, vault};
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::io::{self, Write};

/// Options for one purge run, built once by the CLI dispatcher
#[derive(Debug, Clone)]
pub struct PurgeOptions {
    pub search: Option<String>,
    pub batch: usize,
    pub permanent: bool,
}

/// Progress counters for one run
///
/// `completed` is written only by the aggregation loop in [`start`], never by
/// the workers, and never exceeds `total`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub total: usize,
    pub completed: usize,
}

pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Run one purge session end to end
///
/// # Errors
///
/// Returns an error if the agent executable is unavailable or the item
/// listing fails. A declined confirmation is not an error.
pub async fn start(agent: &Agent, options: PurgeOptions) -> Result<()> {
    let PurgeOptions {
        search,
        batch,
        permanent,
    } = options;

    // Fail closed before any side effect if the agent is unusable
    agent
        .version()
        .await
        .context("Bitwarden CLI is not available")?;

    if permanent {
        println!(
            "{} - Mode: permanent deletion, items will bypass the trash",
            timestamp()
        );
    } else {
        println!(
            "{} - Mode: standard deletion, items will go to the trash",
            timestamp()
        );
    }

    // A stale local cache would enumerate items that no longer exist
    println!("{} - Syncing vault before listing", timestamp());
    match agent.sync().await {
        Ok(output) => {
            let output = output.trim().to_string();
            if output.is_empty() {
                println!("{} - Sync completed", timestamp());
            } else {
                println!("{} - Sync completed: {output}", timestamp());
            }
        }
        Err(e) => eprintln!(
            "{} - Warning: initial sync failed, continuing: {e}",
            timestamp()
        ),
    }

    let items = vault::list_items(agent, search.as_deref())
        .await
        .context("failed to list vault items")?;

    let mut stats = RunStats {
        total: items.len(),
        completed: 0,
    };
    println!("{} - Found {} items to delete", timestamp(), stats.total);

    if stats.total == 0 {
        return Ok(());
    }

    if !confirm_deletion(stats.total, permanent) {
        println!("{} - Operation cancelled", timestamp());
        return Ok(());
    }

    println!("{} - Starting deletion with {batch} parallel workers", timestamp());

    let ids = items.into_iter().map(|item| item.id).collect();
    let mut completions = engine::run(agent, ids, batch, permanent);

    // Single writer: only this loop updates the counters, in arrival order
    while let Some(_completion) = completions.recv().await {
        stats.completed += 1;
        print!("progress [{}/{}]\r", stats.completed, stats.total);
        let _ = io::stdout().flush();
    }
    println!();

    match agent.sync().await {
        Ok(_) => println!("{} - Final sync completed", timestamp()),
        Err(e) => eprintln!("{} - Warning: final sync failed: {e}", timestamp()),
    }

    println!("{} - {}", timestamp(), completion_message(stats, permanent));

    Ok(())
}

/// Ask for a single line of confirmation on stdin
///
/// Anything other than an affirmative answer declines, including a failed
/// read.
fn confirm_deletion(total: usize, permanent: bool) -> bool {
    print!("{} (y/N) ", confirm_prompt(total, permanent));
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().read_line(&mut answer).is_err() {
        return false;
    }

    is_affirmative(&answer)
}

fn confirm_prompt(total: usize, permanent: bool) -> String {
    if permanent {
        format!("Are you sure you want to PERMANENTLY delete all {total} items?")
    } else {
        format!("Are you sure you want to delete all {total} items?")
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn completion_message(stats: RunStats, permanent: bool) -> String {
    if permanent {
        format!("All {} items have been permanently deleted", stats.total)
    } else {
        format!("All {} items have been moved to the trash", stats.total)
    }
}
