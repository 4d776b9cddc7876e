use std::sync::{Arc, Mutex};

#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tracing::{error, info};

use crate::client::{BookingGateway, ClientError};
use crate::models::booking::BookingForm;
use crate::models::confirmation::ConfirmationRecord;
use crate::services::session::{SessionStore, CONFIRMATION_KEY};
use crate::services::validation::{validate, ValidationError};

/// Path the user lands on after a successful booking.
pub const CONFIRMATION_PATH: &str = "/confirmation";

/// Navigation collaborator, invoked exactly once per successful submission.
#[cfg_attr(test, automock)]
pub trait Navigate: Send + Sync {
    fn navigate(&self, path: &str, record: &ConfirmationRecord);
}

/// Production navigator. The HTTP layer carries the redirect in the submit
/// response, so signalling the view transition is a log line here.
pub struct ViewNavigator;

impl Navigate for ViewNavigator {
    fn navigate(&self, path: &str, record: &ConfirmationRecord) {
        info!("Navigating to {} with booking {}", path, record.booking_id);
    }
}

/// Where a submit attempt currently stands. Failed states are re-entrant:
/// the next submit starts over at `Validating`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    FailedValidation,
    FailedNetwork,
    FailedPersist,
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Bokningen kunde inte skickas, försök igen")]
    Network(#[source] ClientError),
    #[error("Bekräftelsen kunde inte sparas")]
    Persist(#[source] serde_json::Error),
    #[error("En bokning skickas redan")]
    AlreadyInFlight,
}

/// Drives one booking attempt end to end:
/// validate, POST to the reservation API, persist, navigate.
pub struct BookingSubmitter {
    gateway: Arc<dyn BookingGateway>,
    sessions: Arc<SessionStore>,
    navigator: Arc<dyn Navigate>,
    state: Mutex<SubmitState>,
}

impl BookingSubmitter {
    pub fn new(
        gateway: Arc<dyn BookingGateway>,
        sessions: Arc<SessionStore>,
        navigator: Arc<dyn Navigate>,
    ) -> Self {
        Self {
            gateway,
            sessions,
            navigator,
            state: Mutex::new(SubmitState::Idle),
        }
    }

    pub fn state(&self) -> SubmitState {
        *self.state.lock().unwrap()
    }

    fn set_state(&self, next: SubmitState) {
        *self.state.lock().unwrap() = next;
    }

    /// Submit an immutable snapshot of the form. At most one request is in
    /// flight at a time; a submit during an active attempt is rejected
    /// without touching the network.
    pub async fn submit(&self, snapshot: BookingForm) -> Result<ConfirmationRecord, SubmitError> {
        {
            let mut state = self.state.lock().unwrap();
            if matches!(*state, SubmitState::Validating | SubmitState::Submitting) {
                return Err(SubmitError::AlreadyInFlight);
            }
            *state = SubmitState::Validating;
        }

        let payload = match validate(&snapshot) {
            Ok(payload) => payload,
            Err(err) => {
                info!("Booking rejected by validation: {}", err);
                self.set_state(SubmitState::FailedValidation);
                return Err(SubmitError::Validation(err));
            }
        };

        self.set_state(SubmitState::Submitting);
        let details = match self.gateway.book(&payload).await {
            Ok(response) => response.booking_details,
            Err(err) => {
                error!("Booking request failed: {}", err);
                self.set_state(SubmitState::FailedNetwork);
                return Err(SubmitError::Network(err));
            }
        };

        // The store write happens before the navigation signal; the
        // confirmation view reads strictly after both.
        let stored = match serde_json::to_string(&details) {
            Ok(stored) => stored,
            Err(err) => {
                error!("Failed to serialize confirmation record: {}", err);
                self.set_state(SubmitState::FailedPersist);
                return Err(SubmitError::Persist(err));
            }
        };
        self.sessions.set(CONFIRMATION_KEY, stored);
        self.navigator.navigate(CONFIRMATION_PATH, &details);
        self.set_state(SubmitState::Succeeded);

        info!(
            "Booking {} confirmed at {} sek",
            details.booking_id, details.price
        );
        Ok(details)
    }
}
