//! Vault item enumeration
//!
//! Decodes the agent's `list items` JSON payload. The agent is the source of
//! truth for what matches a search term, no filtering happens here.

use crate::agent::{Agent, AgentError};
use serde::Deserialize;
use thiserror::Error;

/// One vault record as reported by the agent
///
/// Identity is `id`; `name` is informational only. Unknown payload fields are
/// ignored.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct VaultItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Error)]
pub enum ListError {
    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("malformed item list from the agent: {0}")]
    Parse(#[from] serde_json::Error),
}

/// List candidate items, optionally constrained by a search term
///
/// # Errors
///
/// Returns `ListError::Agent` if the list subprocess fails and
/// `ListError::Parse` if its payload cannot be decoded
pub async fn list_items(
    agent: &Agent,
    search: Option<&str>,
) -> Result<Vec<VaultItem>, ListError> {
    let raw = agent.list_items_raw(search).await?;
    let items = serde_json::from_slice(&raw)?;
    Ok(items)
}
