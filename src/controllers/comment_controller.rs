use crate::{
    error::Result,
    middlewares::mw_auth::Ctx,
    models::comment::{Comment, ModifyCommentRequest},
    services::comment_service::CommentService,
    validators::comment_validator::CommentValidator,
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

pub struct CommentController;

impl CommentController {
    pub async fn modify_comment(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path(comment_id): Path<String>,
        Json(request): Json<ModifyCommentRequest>,
    ) -> Result<Json<Comment>> {
        CommentValidator::validate_modify(&request)?;
        let comment =
            CommentService::modify_comment(&state.catalog, &ctx, &comment_id, request).await?;

        Ok(Json(comment))
    }

    pub async fn delete_comment(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path(comment_id): Path<String>,
    ) -> Result<StatusCode> {
        CommentService::delete_comment(&state.catalog, &ctx, &comment_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }
}
