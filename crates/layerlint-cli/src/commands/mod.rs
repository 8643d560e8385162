//! CLI subcommand implementations.

pub mod check;
pub mod check_set;
pub mod init;
pub mod list_rules;
pub mod output;
pub mod suggest;
