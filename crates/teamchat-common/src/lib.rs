//! # teamchat-common
//!
//! Shared utilities including configuration, error handling, authentication,
//! file storage, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod storage;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{Claims, JwtService};
pub use config::{
    AppConfig, AppSettings, ConfigError, DatabaseConfig, Environment, JwtConfig, RedisConfig,
    StorageConfig,
};
pub use error::{AppError, AppResult};
pub use storage::{FileStore, LocalFileStore, UrlSigner};
pub use telemetry::{init_tracing, try_init_tracing, TracingConfig, TracingError};
