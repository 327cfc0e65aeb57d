//! Booking row models.

use serde::Serialize;
use slotbook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `bookings` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Booking {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub client_id: DbId,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A booking joined with its client and owning user, as returned by the
/// weekly listing.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct WeekBooking {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub created_at: Timestamp,
    pub client_id: DbId,
    pub client_name: String,
    pub user_id: DbId,
    pub user_name: String,
}
