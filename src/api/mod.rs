pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    Router,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
    web,
};
use state::AppState;

pub fn create_app(
    service_context: Arc<ServiceContext>,
    settings: Arc<Settings>,
) -> Router {
    let cors = cors_layer(&settings);
    let static_routes = web::create_static_routes(&settings);
    let app_state = AppState::new(service_context, settings);

    Router::new()
        .route("/health", get(handlers::root::health_check))
        .route("/api", get(handlers::root::api_info))

        // API routes
        .merge(member_routes())

        // Add state to the router
        .with_state(app_state)

        .merge(static_routes)

        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(CompressionLayer::new()),
        )
}

fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/api/members", get(handlers::members::list).post(handlers::members::create))
        .route("/api/members/", get(handlers::members::list).post(handlers::members::create))
        .route(
            "/api/members/:id",
            get(handlers::members::get)
                .put(handlers::members::update)
                .delete(handlers::members::delete),
        )
        .route(
            "/api/members/:id/upload",
            post(handlers::members::upload).layer(DefaultBodyLimit::disable()),
        )
}

/// Only the configured origin is allowed; any method or header it asks for
/// in a preflight is granted.
fn cors_layer(settings: &Settings) -> CorsLayer {
    let origin = match HeaderValue::from_str(&settings.cors.allowed_origin) {
        // Echoed back only when the request origin matches
        Ok(origin) => AllowOrigin::list([origin]),
        Err(e) => {
            tracing::warn!(
                "Invalid CORS origin {:?}: {}. Cross-origin requests will be rejected.",
                settings.cors.allowed_origin,
                e
            );
            AllowOrigin::list(Vec::<HeaderValue>::new())
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
