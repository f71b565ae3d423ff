use crate::{
    error::Result,
    middlewares::mw_auth::Ctx,
    models::album::{AlbumView, ModifyAlbumRequest},
    services::album_service::AlbumService,
    validators::{album_validator::AlbumValidator, form_validator::FormData},
    AppState,
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TrackPosition {
    pub album_id: String,
    pub song_id: String,
    pub track_number: u32,
}

pub struct AlbumController;

impl AlbumController {
    pub async fn get_albums(State(state): State<AppState>) -> Result<Json<Vec<AlbumView>>> {
        let albums = AlbumService::get_albums(&state.catalog).await?;

        Ok(Json(albums))
    }

    pub async fn get_album(
        State(state): State<AppState>,
        Path(album_id): Path<String>,
    ) -> Result<Json<AlbumView>> {
        let album = AlbumService::get_album(&state.catalog, &album_id).await?;

        Ok(Json(album))
    }

    pub async fn create_album(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        multipart: Multipart,
    ) -> Result<(StatusCode, Json<AlbumView>)> {
        ctx.require_superuser()?;

        let form = FormData::from_multipart(multipart).await?;
        let request = AlbumValidator::create_request(&form)?;
        let album = AlbumService::create_album(&state.catalog, &ctx, request).await?;

        Ok((StatusCode::CREATED, Json(album)))
    }

    pub async fn modify_album(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path(album_id): Path<String>,
        Json(request): Json<ModifyAlbumRequest>,
    ) -> Result<Json<AlbumView>> {
        AlbumValidator::validate_modify(&album_id, &request)?;
        let album = AlbumService::modify_album(&state.catalog, &ctx, &album_id, request).await?;

        Ok(Json(album))
    }

    pub async fn delete_album(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path(album_id): Path<String>,
    ) -> Result<StatusCode> {
        AlbumService::delete_album(&state.catalog, &ctx, &album_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn attach_song(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path((album_id, song_id)): Path<(String, String)>,
    ) -> Result<Json<TrackPosition>> {
        let track_number =
            AlbumService::attach_song(&state.catalog, &ctx, &album_id, &song_id).await?;

        Ok(Json(TrackPosition {
            album_id,
            song_id,
            track_number,
        }))
    }

    pub async fn detach_song(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path((album_id, song_id)): Path<(String, String)>,
    ) -> Result<StatusCode> {
        AlbumService::detach_song(&state.catalog, &ctx, &album_id, &song_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }
}
