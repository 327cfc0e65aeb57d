//! Route definitions for the booking lifecycle.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Booking routes.
///
/// ```text
/// GET    /            -> index (?page)
/// POST   /            -> store
/// GET    /by-weeks    -> by_weeks (?week, ?page)
/// PUT    /{id}        -> update
/// DELETE /{id}        -> destroy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bookings::index).post(bookings::store))
        .route("/by-weeks", get(bookings::by_weeks))
        .route("/{id}", put(bookings::update).delete(bookings::destroy))
}
