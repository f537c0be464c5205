//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - The message board routes (`/upload`, `/messages`, `/get-image-url`)
//! - The static index page
//! - Error responses

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::{Router, extract::DefaultBodyLimit};
use msgcreator_core::cdn::CdnUrlBuilder;
use msgcreator_core::storage::StorageService;
use msgcreator_db::MessageRepository;
use msgcreator_shared::ServerConfig;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
///
/// Every handle is built once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Message repository over the database pool.
    pub messages: Arc<MessageRepository>,
    /// Object storage for uploaded images.
    pub storage: Arc<StorageService>,
    /// Public URL builder for stored images.
    pub cdn: Arc<CdnUrlBuilder>,
}

/// Creates the main application router.
pub fn create_router(state: AppState, server: &ServerConfig) -> Router {
    let index = ServeFile::new(server.static_dir.join("index.html"));

    Router::new()
        .merge(routes::api_routes())
        .route_service("/", index)
        .layer(DefaultBodyLimit::max(server.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use http_body_util::BodyExt;
    use msgcreator_shared::StorageProvider;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let db = MockDatabase::new(DatabaseBackend::MySql).into_connection();
        AppState {
            messages: Arc::new(MessageRepository::new(db)),
            storage: Arc::new(StorageService::from_provider(StorageProvider::Memory).unwrap()),
            cdn: Arc::new(CdnUrlBuilder::new("cdn.example.com")),
        }
    }

    #[tokio::test]
    async fn test_index_serves_static_page() {
        let dir = std::env::temp_dir().join(format!("msgcreator-static-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html><body>board</body></html>").unwrap();

        let server = ServerConfig {
            static_dir: dir,
            ..ServerConfig::default()
        };
        let app = create_router(test_state(), &server);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
        assert!(content_type.starts_with("text/html"));
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"<html><body>board</body></html>");
    }

    #[tokio::test]
    async fn test_index_missing_page_is_not_found() {
        let server = ServerConfig {
            static_dir: std::env::temp_dir().join("msgcreator-static-missing"),
            ..ServerConfig::default()
        };
        let app = create_router(test_state(), &server);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
