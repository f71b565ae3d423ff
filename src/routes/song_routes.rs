use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::{controllers::song_controller::SongController, AppState};

/// Songs carry lossless audio, well above axum's default body limit.
const MAX_SONG_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

pub struct SongRoutes;

impl SongRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route(
                "/songs",
                get(SongController::get_songs)
                    .post(SongController::create_song)
                    .layer(DefaultBodyLimit::max(MAX_SONG_UPLOAD_BYTES)),
            )
            .route(
                "/songs/{song_id}",
                get(SongController::get_song)
                    .patch(SongController::modify_song)
                    .delete(SongController::delete_song),
            )
            .route(
                "/songs/{song_id}/comments",
                post(SongController::create_comment),
            )
    }
}
