//! Integration test utilities for the chat services
//!
//! Provides in-memory implementations of the repository and file-store
//! ports plus helpers wiring them into a `ServiceContext`, so the full
//! chat flow runs end-to-end without PostgreSQL or Redis.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
