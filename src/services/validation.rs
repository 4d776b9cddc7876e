use thiserror::Error;

use crate::models::booking::BookingForm;
use crate::models::confirmation::BookingPayload;

/// Each lane holds at most this many players.
pub const MAX_PLAYERS_PER_LANE: i64 = 4;

/// Reasons a booking form is rejected at submit time. The `Display` text is
/// the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Alla fälten måste vara ifyllda")]
    MissingFields,
    #[error("Antalet skor måste stämma överens med antal spelare")]
    ShoeCountMismatch,
    #[error("Alla skor måste vara ifyllda")]
    IncompleteShoes,
    #[error("Det får max vara 4 spelare per bana")]
    LaneCapacityExceeded,
}

// The checks run in this order and the first one to report wins. The order
// is part of the contract: a form violating several rules reports the
// earliest one only.
const CHECKS: [fn(&BookingForm) -> Option<ValidationError>; 4] =
    [required_fields, shoe_count, shoe_sizes, lane_capacity];

/// Validate a form snapshot and normalize it into the wire payload: `when`
/// becomes `{date}T{time}`, the counts keep their string representation, and
/// the shoe list is reduced to its ordered sizes with the ids stripped.
pub fn validate(form: &BookingForm) -> Result<BookingPayload, ValidationError> {
    for check in CHECKS {
        if let Some(error) = check(form) {
            return Err(error);
        }
    }

    Ok(BookingPayload {
        when: format!("{}T{}", form.when, form.time),
        lanes: form.lanes.clone(),
        people: form.people.clone(),
        shoes: form.shoes.iter().map(|shoe| shoe.size.clone()).collect(),
    })
}

// Empty and non-numeric count fields both read as "not filled in".
fn parse_count(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn required_fields(form: &BookingForm) -> Option<ValidationError> {
    let filled = !form.when.trim().is_empty()
        && !form.time.trim().is_empty()
        && parse_count(&form.people).map_or(false, |people| people >= 1)
        && parse_count(&form.lanes).map_or(false, |lanes| lanes >= 1);

    (!filled).then_some(ValidationError::MissingFields)
}

// One shoe entry per player, even when no shoes were added at all.
fn shoe_count(form: &BookingForm) -> Option<ValidationError> {
    let people = parse_count(&form.people)?;
    (form.shoes.len() as i64 != people).then_some(ValidationError::ShoeCountMismatch)
}

fn shoe_sizes(form: &BookingForm) -> Option<ValidationError> {
    form.shoes
        .iter()
        .any(|shoe| shoe.size.trim().is_empty())
        .then_some(ValidationError::IncompleteShoes)
}

fn lane_capacity(form: &BookingForm) -> Option<ValidationError> {
    let people = parse_count(&form.people)?;
    let lanes = parse_count(&form.lanes)?;
    (people > lanes * MAX_PLAYERS_PER_LANE).then_some(ValidationError::LaneCapacityExceeded)
}
