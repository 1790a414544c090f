use crate::{agent::Agent, cli::actions::Action, purge::PurgeOptions};
use anyhow::{Result, bail};
use clap::ArgMatches;

/// Convert `ArgMatches` into typed Action enum with validation
///
/// # Errors
///
/// Returns an error if the batch size is zero
pub fn dispatch(matches: &ArgMatches) -> Result<Action> {
    // Extract search term, empty means no filter
    let search = matches
        .get_one::<String>("search")
        .filter(|term| !term.is_empty())
        .cloned();

    // Extract and validate batch size
    let batch = matches.get_one::<u16>("batch").copied().unwrap_or(1);
    if batch == 0 {
        bail!("batch size must be at least 1");
    }

    let permanent = matches.get_flag("permanent");

    // Extract the agent executable with default
    let bw_bin = matches
        .get_one::<String>("bw-bin")
        .cloned()
        .unwrap_or_else(|| String::from("bw"));

    Ok(Action::Purge {
        agent: Agent::new(bw_bin),
        options: PurgeOptions {
            search,
            batch: usize::from(batch),
            permanent,
        },
    })
}
