use axum::{
    extract::{Json as ExtractJson, Path, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::models::booking::{BookingForm, FieldChange, ShoeEntry, ShoeSizeChange};
use crate::models::confirmation::ConfirmationRecord;
use crate::services::session::{SessionStore, CONFIRMATION_KEY};
use crate::services::submitter::{BookingSubmitter, SubmitError, CONFIRMATION_PATH};

/// Indicator shown by the confirmation view when no booking exists.
pub const NO_BOOKING_MESSAGE: &str = "Inga bokning gjord!";

// AppState struct containing shared resources
pub struct AppState {
    pub form: Mutex<BookingForm>,
    pub submitter: BookingSubmitter,
    pub sessions: Arc<SessionStore>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Successful submit response: the redirect the view follows plus the record
// it navigates with.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub redirect: &'static str,
    pub confirmation_details: ConfirmationRecord,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation_details: Option<ConfirmationRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConfirmationView {
    fn booked(record: ConfirmationRecord) -> Self {
        Self {
            confirmation_details: Some(record),
            message: None,
        }
    }

    fn no_booking() -> Self {
        Self {
            confirmation_details: None,
            message: Some(NO_BOOKING_MESSAGE.to_string()),
        }
    }
}

// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

// Field-change event endpoint: one named form field, one raw value
pub async fn update_booking_field(
    State(state): State<Arc<AppState>>,
    ExtractJson(change): ExtractJson<FieldChange>,
) -> Result<Json<BookingForm>, StatusCode> {
    let mut form = state.form.lock().unwrap();

    if !form.apply_field(&change.name, change.value) {
        return Err(StatusCode::BAD_REQUEST);
    }

    Ok(Json(form.clone()))
}

// Append a new shoe entry and return it
pub async fn add_shoe(State(state): State<Arc<AppState>>) -> Json<ShoeEntry> {
    let mut form = state.form.lock().unwrap();
    let entry = form.add_shoe();
    info!("Added shoe entry {}", entry.id);
    Json(entry)
}

// Remove a shoe entry; removing an unknown id is a non-fatal no-op
pub async fn remove_shoe(
    State(state): State<Arc<AppState>>,
    Path(shoe_id): Path<String>,
) -> StatusCode {
    let mut form = state.form.lock().unwrap();

    if form.remove_shoe(&shoe_id) {
        info!("Removed shoe entry {}", shoe_id);
    } else {
        warn!("No shoe entry {} to remove", shoe_id);
    }

    StatusCode::OK
}

// Update the size of a shoe entry
pub async fn update_shoe_size(
    State(state): State<Arc<AppState>>,
    Path(shoe_id): Path<String>,
    ExtractJson(change): ExtractJson<ShoeSizeChange>,
) -> Result<StatusCode, StatusCode> {
    let mut form = state.form.lock().unwrap();

    if form.update_size(&shoe_id, change.value) {
        Ok(StatusCode::OK)
    } else {
        warn!("No shoe entry {} to update", shoe_id);
        Err(StatusCode::NOT_FOUND)
    }
}

// Submit the booking: snapshot the form and run it through the submitter.
// Every rejected path carries exactly one visible message.
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SubmitResponse>, (StatusCode, Json<ErrorResponse>)> {
    let snapshot = state.form.lock().unwrap().clone();
    info!(
        "Received booking submission for {} {}",
        snapshot.when, snapshot.time
    );

    match state.submitter.submit(snapshot).await {
        Ok(details) => Ok(Json(SubmitResponse {
            redirect: CONFIRMATION_PATH,
            confirmation_details: details,
        })),
        Err(err) => {
            let status = match &err {
                SubmitError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                SubmitError::Network(_) => StatusCode::BAD_GATEWAY,
                SubmitError::Persist(_) => StatusCode::INTERNAL_SERVER_ERROR,
                SubmitError::AlreadyInFlight => StatusCode::CONFLICT,
            };
            Err((
                status,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            ))
        }
    }
}

// Confirmation view: the stored record, or the no-booking indicator. This
// endpoint never fails; a corrupt stored value degrades to no-booking.
pub async fn show_confirmation(State(state): State<Arc<AppState>>) -> Json<ConfirmationView> {
    match state.sessions.get(CONFIRMATION_KEY) {
        Some(stored) => match serde_json::from_str::<ConfirmationRecord>(&stored) {
            Ok(record) => Json(ConfirmationView::booked(record)),
            Err(err) => {
                warn!("Stored confirmation could not be parsed: {}", err);
                Json(ConfirmationView::no_booking())
            }
        },
        None => Json(ConfirmationView::no_booking()),
    }
}
