//! CLI subcommand implementations.

pub mod header;
pub mod layout;
pub mod show;
pub mod util;
