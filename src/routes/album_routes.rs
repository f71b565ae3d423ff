use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};

use crate::{controllers::album_controller::AlbumController, AppState};

const MAX_ARTWORK_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

pub struct AlbumRoutes;

impl AlbumRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route(
                "/albums",
                get(AlbumController::get_albums)
                    .post(AlbumController::create_album)
                    .layer(DefaultBodyLimit::max(MAX_ARTWORK_UPLOAD_BYTES)),
            )
            .route(
                "/albums/{album_id}",
                get(AlbumController::get_album)
                    .patch(AlbumController::modify_album)
                    .delete(AlbumController::delete_album),
            )
            .route(
                "/albums/{album_id}/songs/{song_id}",
                put(AlbumController::attach_song).delete(AlbumController::detach_song),
            )
    }
}
