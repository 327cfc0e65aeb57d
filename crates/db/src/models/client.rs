//! Client row model. Clients are managed by an external system; this
//! service only reads them.

use serde::Serialize;
use slotbook_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `clients` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub created_at: Timestamp,
}
