//! Strajk Bowling Booking Service
//!
//! This library implements the booking workflow for the Strajk bowling
//! form: form field state with per-player shoe entries, submit-time
//! validation, the round trip to the lane reservation API, and the
//! session-scoped confirmation record read by the confirmation view.
//!
//! # Modules
//!
//! - `client`: BookingApiClient for the reservation API
//! - `models`: form state and wire types
//! - `services`: validation, submission and session persistence
//! - `handlers` / `routes`: the HTTP surface the form view talks to

pub mod client;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

// Re-export the main types for ease of use
pub use client::{BookingApiClient, BookingGateway, ClientError};
pub use handlers::api::AppState;
pub use routes::create_router;

#[cfg(test)]
pub mod client_mock;
