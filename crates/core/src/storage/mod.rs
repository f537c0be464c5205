//! Object storage for uploaded images using Apache OpenDAL.
//!
//! The store is used write-only: images are put under their object key and
//! served to readers by the CDN, never read back through this service.
//!
//! Supported providers:
//! - AWS S3 and S3-compatible stores
//! - Local filesystem (development only)
//! - Memory (tests only)

mod error;
mod service;

pub use error::StorageError;
pub use msgcreator_shared::StorageProvider;
pub use service::StorageService;
