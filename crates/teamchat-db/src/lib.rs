//! # teamchat-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `teamchat-core`. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! Schema lives under `migrations/` and relies on foreign-key cascades
//! (room → memberships/messages, message → attachment) plus a unique
//! `direct_key` for atomic direct-room creation.

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, DatabaseConfig, PgPool};
pub use repositories::{
    PgAttachmentRepository, PgMembershipRepository, PgMessageRepository, PgRoomRepository,
    PgUserRepository,
};
