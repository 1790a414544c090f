pub mod agent;
pub mod cli;
pub mod purge;
pub mod vault;
