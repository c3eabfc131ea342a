//! CLI subcommands.

pub mod convert;
pub mod schema;
