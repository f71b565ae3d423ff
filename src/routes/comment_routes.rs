use axum::{routing::patch, Router};

use crate::{controllers::comment_controller::CommentController, AppState};

pub struct CommentRoutes;

impl CommentRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new().route(
            "/comments/{comment_id}",
            patch(CommentController::modify_comment).delete(CommentController::delete_comment),
        )
    }
}
