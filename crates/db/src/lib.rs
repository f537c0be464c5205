//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - Repository implementations of the core persistence traits
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::MessageRepository;

use msgcreator_shared::DatabaseConfig;
use sea_orm::{DatabaseConnection, SqlxMySqlConnector};
use sqlx::mysql::{MySqlConnectOptions, MySqlPoolOptions};
use tracing::debug;

/// Establishes a pooled connection to the MySQL database.
///
/// Connections check out of the pool per query and go back on drop,
/// whether the query succeeded or not.
///
/// # Errors
///
/// Returns an error if the connection cannot be established within the
/// configured connect timeout.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, sqlx::Error> {
    let options = MySqlConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .username(&config.user)
        .password(&config.password)
        .database(&config.name)
        .charset(config.charset());

    debug!(
        host = %config.host,
        port = config.port,
        database = %config.name,
        "Connecting to database"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.connect_timeout())
        .connect_with(options)
        .await?;

    Ok(SqlxMySqlConnector::from_sqlx_mysql_pool(pool))
}
