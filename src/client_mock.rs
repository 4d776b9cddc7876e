use axum::{response::Json, routing::post, Router};
use std::net::SocketAddr;
use std::time::Duration;

use crate::models::confirmation::{BookingPayload, BookingResponse, ConfirmationRecord};

// Pricing applied by the mock reservation backend.
pub const PRICE_PER_PERSON: i64 = 120;
pub const PRICE_PER_LANE: i64 = 100;
pub const MOCK_BOOKING_ID: &str = "STR7518";

// Mock reservation backend: echoes the request back as a confirmed booking
// with the standard price calculation.
async fn confirm_booking(Json(payload): Json<BookingPayload>) -> Json<BookingResponse> {
    let people: i64 = payload.people.trim().parse().unwrap_or(0);
    let lanes: i64 = payload.lanes.trim().parse().unwrap_or(0);

    Json(BookingResponse {
        booking_details: ConfirmationRecord {
            when: payload.when,
            people,
            lanes,
            booking_id: MOCK_BOOKING_ID.to_string(),
            price: people * PRICE_PER_PERSON + lanes * PRICE_PER_LANE,
            shoes: payload.shoes,
        },
    })
}

pub fn booking_backend_router() -> Router {
    Router::new().route("/booking", post(confirm_booking))
}

/// Serve the mock backend on an ephemeral loopback port and return the
/// bound address.
pub async fn spawn_booking_backend() -> SocketAddr {
    serve(booking_backend_router()).await
}

/// Backend that waits before confirming, to keep a submission in flight.
pub async fn spawn_slow_booking_backend(delay: Duration) -> SocketAddr {
    let router = Router::new().route(
        "/booking",
        post(move |payload: Json<BookingPayload>| async move {
            tokio::time::sleep(delay).await;
            confirm_booking(payload).await
        }),
    );
    serve(router).await
}

/// Backend that answers 200 with a body that is not a booking response.
pub async fn spawn_malformed_backend() -> SocketAddr {
    let router = Router::new().route("/booking", post(|| async { "not a booking response" }));
    serve(router).await
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Mock backend has no address");

    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Mock backend failed");
    });

    addr
}
