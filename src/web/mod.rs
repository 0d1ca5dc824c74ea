pub mod uploads;

use axum::Router;
use tower_http::services::ServeDir;

use crate::config::Settings;

/// Serves avatars and other static assets under `/static`.
pub fn create_static_routes(settings: &Settings) -> Router {
    Router::new()
        .nest_service("/static", ServeDir::new(&settings.storage.static_dir))
}
