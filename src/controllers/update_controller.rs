use crate::{
    error::Result,
    middlewares::mw_auth::Ctx,
    models::{
        pagination::UpdatesQuery,
        update::{CreateUpdateRequest, ModifyUpdateRequest, UpdateView},
    },
    services::update_service::UpdateService,
    validators::update_validator::UpdateValidator,
    AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

pub struct UpdateController;

impl UpdateController {
    pub async fn get_updates(
        State(state): State<AppState>,
        Query(query): Query<UpdatesQuery>,
    ) -> Result<Json<Vec<UpdateView>>> {
        let updates = UpdateService::get_updates(&state.catalog, &query).await?;

        Ok(Json(updates))
    }

    pub async fn create_update(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Json(request): Json<CreateUpdateRequest>,
    ) -> Result<(StatusCode, Json<UpdateView>)> {
        UpdateValidator::validate_create(&request)?;
        let update = UpdateService::create_update(&state.catalog, &ctx, request).await?;

        Ok((StatusCode::CREATED, Json(update)))
    }

    pub async fn modify_update(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path(update_id): Path<String>,
        Json(request): Json<ModifyUpdateRequest>,
    ) -> Result<Json<UpdateView>> {
        UpdateValidator::validate_modify(&request)?;
        let update =
            UpdateService::modify_update(&state.catalog, &ctx, &update_id, request).await?;

        Ok(Json(update))
    }

    pub async fn delete_update(
        State(state): State<AppState>,
        Extension(ctx): Extension<Ctx>,
        Path(update_id): Path<String>,
    ) -> Result<StatusCode> {
        UpdateService::delete_update(&state.catalog, &ctx, &update_id).await?;

        Ok(StatusCode::NO_CONTENT)
    }
}
