//! Repository for the `clients` table.

use slotbook_core::types::DbId;
use sqlx::PgPool;

use crate::models::client::Client;

/// Column list for clients queries.
const COLUMNS: &str = "id, name, email, created_at";

/// Read access to clients.
pub struct ClientRepo;

impl ClientRepo {
    /// List all clients, ordered by name ascending.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY name ASC");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Find a client by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
