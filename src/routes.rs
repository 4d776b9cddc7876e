use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::api::{
    add_shoe, health_check, remove_shoe, show_confirmation, submit_booking,
    update_booking_field, update_shoe_size, AppState,
};
use crate::services::submitter::CONFIRMATION_PATH;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/booking/fields", post(update_booking_field))
        .route("/booking/shoes", post(add_shoe))
        .route(
            "/booking/shoes/:shoe_id",
            patch(update_shoe_size).delete(remove_shoe),
        )
        .route("/booking/submit", post(submit_booking))
        .route(CONFIRMATION_PATH, get(show_confirmation))
        .with_state(app_state)
}
