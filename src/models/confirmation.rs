use serde::{Deserialize, Serialize};

// Wire payload for the reservation API. The counts stay strings: the
// endpoint expects them exactly as the form typed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingPayload {
    pub when: String,
    pub lanes: String,
    pub people: String,
    pub shoes: Vec<String>,
}

/// The normalized result of a successful booking, taken verbatim from the
/// reservation API response and persisted for the confirmation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRecord {
    pub when: String,
    pub people: i64,
    pub lanes: i64,
    pub booking_id: String,
    pub price: i64,
    pub shoes: Vec<String>,
}

// Response envelope of the reservation API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_details: ConfirmationRecord,
}
