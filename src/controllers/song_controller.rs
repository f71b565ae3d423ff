use crate::{
    error::Result,
    middlewares::mw_auth::Ctx,
    models::{
        comment::{Comment, CreateCommentRequest},
        song::{ModifySongRequest, SongView},
    },
    services::{comment_service::CommentService, song_service::SongService},
    validators::{
        comment_validator::CommentValidator, form_validator::FormData,
        song_validator::SongValidator,
    },
    AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};

pub struct SongController;

impl SongController {
    pub async fn get_songs(State(state): State<AppState>) -> Result<Json<Vec<SongView>>> {
        let songs = SongService::get_songs(&state.catalog).await?;

        Ok(Json(songs))
    }

    pub async fn get_song(
        State(state): State<AppState>,
        Path(song_id): Path<String>,
    ) -> Result<Json<SongView>> {
        let song = SongService::get_song(&state.catalog, &song_id).await?;

        Ok(Json(song))
    }

    pub async fn create_song(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        multipart: Multipart,
    ) -> Result<(StatusCode, Json<SongView>)> {
        // Refuse before buffering the upload.
        ctx.require_superuser()?;

        let form = FormData::from_multipart(multipart).await?;
        let request = SongValidator::create_request(&form)?;
        let song = SongService::create_song(&state.catalog, &ctx, request).await?;

        Ok((StatusCode::CREATED, Json(song)))
    }

    pub async fn modify_song(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path(song_id): Path<String>,
        Json(request): Json<ModifySongRequest>,
    ) -> Result<Json<SongView>> {
        SongValidator::validate_modify(&song_id, &request)?;
        let song = SongService::modify_song(&state.catalog, &ctx, &song_id, request).await?;

        Ok(Json(song))
    }

    pub async fn delete_song(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path(song_id): Path<String>,
    ) -> Result<StatusCode> {
        SongService::delete_song(&state.catalog, &ctx, &song_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn create_comment(
        State(state): State<AppState>,
        Path(song_id): Path<String>,
        Json(request): Json<CreateCommentRequest>,
    ) -> Result<(StatusCode, Json<Comment>)> {
        CommentValidator::validate_create(&request)?;
        let comment = CommentService::create_comment(&state.catalog, &song_id, request).await?;

        Ok((StatusCode::CREATED, Json(comment)))
    }
}
