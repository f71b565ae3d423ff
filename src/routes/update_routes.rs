use axum::{
    routing::{get, patch},
    Router,
};

use crate::{controllers::update_controller::UpdateController, AppState};

pub struct UpdateRoutes;

impl UpdateRoutes {
    pub fn routes() -> Router<AppState> {
        Router::new()
            .route(
                "/updates",
                get(UpdateController::get_updates).post(UpdateController::create_update),
            )
            .route(
                "/updates/{update_id}",
                patch(UpdateController::modify_update).delete(UpdateController::delete_update),
            )
    }
}
