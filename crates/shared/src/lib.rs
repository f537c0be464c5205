//! Shared errors and configuration for msgcreator.
//!
//! This crate provides common types used across all other crates:
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;

pub use config::{AppConfig, CdnConfig, DatabaseConfig, ServerConfig, StorageProvider};
pub use error::AppError;
