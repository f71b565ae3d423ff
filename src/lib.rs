use std::{path::Path, time::Duration};

use axum::{
    body::Body,
    http::{Request, Response},
    middleware, Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::Span;
use uuid::Uuid;

use crate::{
    auth::token_service::AuthConfig,
    routes::{
        album_routes::AlbumRoutes, comment_routes::CommentRoutes, song_routes::SongRoutes,
        update_routes::UpdateRoutes,
    },
    services::catalog::Catalog,
};

pub use self::error::{Error, Result};

pub mod auth;
pub mod config;
pub mod controllers;
pub mod error;
pub mod helpers;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod validators;

#[cfg(test)]
mod test_support;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub auth_config: AuthConfig,
}

/// The whole HTTP surface: the catalog API under `/api` and the uploaded
/// assets under `/media`.
pub fn app(app_state: AppState, media_dir: impl AsRef<Path>) -> Router {
    let routes_api = Router::new()
        .merge(SongRoutes::routes())
        .merge(AlbumRoutes::routes())
        .merge(CommentRoutes::routes())
        .merge(UpdateRoutes::routes())
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            middlewares::mw_auth::mw_identity,
        ));

    Router::new()
        .nest("/api", routes_api)
        .nest_service("/media", ServeDir::new(media_dir.as_ref()))
        .with_state(app_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4();
                    tracing::info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    tracing::info!("{} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &Response<Body>, latency: Duration, _span: &Span| {
                    let status = response.status();
                    let latency_ms = latency.as_millis();

                    match status.as_u16() {
                        200..=299 => tracing::info!("{} ({}ms)", status, latency_ms),
                        400..=499 => tracing::warn!("{} ({}ms)", status, latency_ms),
                        500..=599 => tracing::error!("{} ({}ms)", status, latency_ms),
                        _ => tracing::info!("{} ({}ms)", status, latency_ms),
                    }
                }),
        )
        .layer(CorsLayer::very_permissive())
}
