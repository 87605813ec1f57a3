//! CLI subcommand implementations.

pub mod add;
pub mod intervals;
pub mod invoice;
pub mod periods;
pub mod totals;
