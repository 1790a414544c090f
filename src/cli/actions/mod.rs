mod run;

use crate::{agent::Agent, purge::PurgeOptions};

/// Action enum representing each possible command
#[derive(Debug)]
pub enum Action {
    Purge { agent: Agent, options: PurgeOptions },
}

impl Action {
    /// Execute the action
    ///
    /// # Errors
    ///
    /// Returns an error if the action fails to execute
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
