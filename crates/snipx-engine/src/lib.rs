//! SnipX Engine - Orchestration layer
//!
//! Coordinates access rules, validation and persistence for every snippet
//! action. Mutations go through `apply_engine_command`, reads through
//! `apply_engine_query`; login sessions and catalog administration have
//! their own entry points.

pub mod commands;

pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
pub use commands::engine_query::{apply_engine_query, EngineQuery, EngineQueryResult};
