use super::Action;

/// Execute the action's business logic by delegating to the appropriate module
pub async fn execute(action: Action) -> anyhow::Result<()> {
    match action {
        Action::Purge { agent, options } => crate::purge::start(&agent, options).await,
    }
}
