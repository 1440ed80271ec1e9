//! Worker pool: one task per identifier, merged back in input order.

pub mod orchestrator;
pub mod worker;
