//! Application configuration management.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bucket that holds uploaded images.
pub const DEFAULT_BUCKET: &str = "msgcreator-images";

/// Character set used for every database connection.
pub const DATABASE_CHARSET: &str = "utf8mb4";

/// Flat environment variables used by existing deployments, mapped onto
/// their configuration keys. These win over every other source.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
    ("DB_NAME", "database.name"),
    ("CLOUDFRONT_DOMAIN", "cdn.domain"),
    ("S3_BUCKET", "storage.bucket"),
    ("S3_ENDPOINT", "storage.endpoint"),
    ("AWS_REGION", "storage.region"),
];

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Object storage configuration.
    #[serde(default)]
    pub storage: StorageProvider,
    /// CDN configuration.
    #[serde(default)]
    pub cdn: CdnConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding `index.html`.
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,
    /// Largest accepted request body for uploads, in bytes.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./static")
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024 // 10MB
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database host.
    #[serde(default = "default_db_host")]
    pub host: String,
    /// Database port.
    #[serde(default = "default_db_port")]
    pub port: u16,
    /// Database user.
    #[serde(default = "default_db_user")]
    pub user: String,
    /// Database password.
    #[serde(default)]
    pub password: String,
    /// Database (schema) name.
    #[serde(default = "default_db_name")]
    pub name: String,
    /// Connection establishment timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Timeout for queries that read rows, in seconds.
    #[serde(default = "default_io_timeout")]
    pub read_timeout_secs: u64,
    /// Timeout for statements that write rows, in seconds.
    #[serde(default = "default_io_timeout")]
    pub write_timeout_secs: u64,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: default_db_host(),
            port: default_db_port(),
            user: default_db_user(),
            password: String::new(),
            name: default_db_name(),
            connect_timeout_secs: default_connect_timeout(),
            read_timeout_secs: default_io_timeout(),
            write_timeout_secs: default_io_timeout(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// Connection establishment timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Read timeout.
    #[must_use]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Write timeout.
    #[must_use]
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    /// Character set for connections. Not configurable.
    #[must_use]
    pub fn charset(&self) -> &'static str {
        DATABASE_CHARSET
    }
}

fn default_db_host() -> String {
    "localhost".to_string()
}

fn default_db_port() -> u16 {
    3306
}

fn default_db_user() -> String {
    "root".to_string()
}

fn default_db_name() -> String {
    "msgcreator".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_io_timeout() -> u64 {
    30
}

fn default_max_connections() -> u32 {
    10
}

/// Storage provider configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// AWS S3 or an S3-compatible store. Credentials come from the standard
    /// AWS environment when not given here.
    S3 {
        /// Bucket name.
        #[serde(default = "default_bucket")]
        bucket: String,
        /// AWS region.
        #[serde(default)]
        region: Option<String>,
        /// Custom endpoint for S3-compatible stores.
        #[serde(default)]
        endpoint: Option<String>,
        /// Access key ID.
        #[serde(default)]
        access_key_id: Option<String>,
        /// Secret access key.
        #[serde(default)]
        secret_access_key: Option<String>,
    },
    /// Local filesystem (development only).
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
    /// In-process memory (tests only).
    Memory,
}

impl Default for StorageProvider {
    fn default() -> Self {
        Self::s3(DEFAULT_BUCKET)
    }
}

impl StorageProvider {
    /// Create an S3 provider for `bucket` with credentials from the environment.
    #[must_use]
    pub fn s3(bucket: impl Into<String>) -> Self {
        Self::S3 {
            bucket: bucket.into(),
            region: None,
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
            Self::Memory => "memory",
        }
    }

    /// Get the bucket name, or a descriptive stand-in for non-bucket providers.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
            Self::Memory => "memory",
        }
    }
}

fn default_bucket() -> String {
    DEFAULT_BUCKET.to_string()
}

/// CDN configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CdnConfig {
    /// Public CDN hostname. Empty means unconfigured.
    #[serde(default)]
    pub domain: String,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .set_default("storage.type", "s3")?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("MSGCREATOR").separator("__"));

        for (var, key) in ENV_OVERRIDES {
            builder = builder.set_override_option(*key, std::env::var(var).ok())?;
        }

        builder.build()?.try_deserialize()
    }
}
