pub mod bookings;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /bookings              GET index, POST store
/// /bookings/by-weeks     GET weekly listing (?week, ?page)
/// /bookings/{id}         PUT update, DELETE destroy
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/bookings", bookings::router())
}
