//! Repository for the `bookings` table.

use slotbook_core::booking::{BookingDraft, TimeRange, PAGE_SIZE};
use slotbook_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::error::RepoError;
use crate::models::booking::{Booking, WeekBooking};

/// Column list for bookings queries.
const COLUMNS: &str =
    "id, title, description, start_time, end_time, client_id, user_id, created_at, updated_at";

/// Lifecycle operations for bookings.
///
/// `create` and `update` run the overlap check and the write inside one
/// transaction; the `excl_bookings_user_time` constraint catches the
/// remaining concurrent-writer window, and both paths surface as
/// [`RepoError::Overlap`].
pub struct BookingRepo;

impl BookingRepo {
    /// Find a booking by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of the user's bookings, newest-created-first, plus the
    /// total row count for pagination metadata.
    pub async fn list_page(
        pool: &PgPool,
        user_id: DbId,
        page: i64,
    ) -> Result<(Vec<Booking>, i64), sqlx::Error> {
        let offset = (page - 1).max(0) * PAGE_SIZE;
        let query = format!(
            "SELECT {COLUMNS} FROM bookings
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, Booking>(&query)
            .bind(user_id)
            .bind(PAGE_SIZE)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// One page of the user's bookings whose `start_time` falls inside the
    /// closed `[week_start, week_end]` window, ascending by `start_time`,
    /// each joined with its client and owning user.
    pub async fn list_week(
        pool: &PgPool,
        user_id: DbId,
        week_start: Timestamp,
        week_end: Timestamp,
        page: i64,
    ) -> Result<(Vec<WeekBooking>, i64), sqlx::Error> {
        let offset = (page - 1).max(0) * PAGE_SIZE;
        let rows = sqlx::query_as::<_, WeekBooking>(
            "SELECT b.id, b.title, b.description, b.start_time, b.end_time, b.created_at,
                    b.client_id, c.name AS client_name, b.user_id, u.name AS user_name
             FROM bookings b
             JOIN clients c ON c.id = b.client_id
             JOIN users u ON u.id = b.user_id
             WHERE b.user_id = $1 AND b.start_time BETWEEN $2 AND $3
             ORDER BY b.start_time ASC
             LIMIT $4 OFFSET $5",
        )
        .bind(user_id)
        .bind(week_start)
        .bind(week_end)
        .bind(PAGE_SIZE)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM bookings
             WHERE user_id = $1 AND start_time BETWEEN $2 AND $3",
        )
        .bind(user_id)
        .bind(week_start)
        .bind(week_end)
        .fetch_one(pool)
        .await?;

        Ok((rows, total))
    }

    /// Store-side overlap predicate: does any booking owned by `user_id`
    /// intersect the closed candidate interval?
    ///
    /// A booking conflicts when its start or end falls within the candidate
    /// (inclusive bounds) or when it strictly contains the candidate —
    /// the same rule as [`TimeRange::conflicts_with`]. `exclude_id` omits
    /// one booking from consideration, for update-against-self checks.
    pub async fn overlap_exists(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
        range: TimeRange,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS (
               SELECT 1 FROM bookings
               WHERE user_id = $1
                 AND ($4::bigint IS NULL OR id <> $4)
                 AND (start_time BETWEEN $2 AND $3
                      OR end_time BETWEEN $2 AND $3
                      OR (start_time < $2 AND end_time > $3))
             )",
        )
        .bind(user_id)
        .bind(range.start)
        .bind(range.end)
        .bind(exclude_id)
        .fetch_one(executor)
        .await
    }

    /// Insert a booking for `user_id` after checking its range against the
    /// user's existing bookings, all in one transaction.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        draft: &BookingDraft,
    ) -> Result<Booking, RepoError> {
        let mut tx = pool.begin().await?;

        if Self::overlap_exists(&mut *tx, user_id, draft.time_range(), None).await? {
            return Err(RepoError::Overlap);
        }

        let query = format!(
            "INSERT INTO bookings (title, description, start_time, end_time, client_id, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.start_time)
            .bind(draft.end_time)
            .bind(draft.client_id)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(RepoError::from_write)?;

        tx.commit().await?;
        tracing::debug!(booking_id = booking.id, user_id, "booking row inserted");
        Ok(booking)
    }

    /// Apply the validated field whitelist to a booking, checking the new
    /// range against the owner's other bookings in the same transaction.
    ///
    /// Returns `Ok(None)` when the booking does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        draft: &BookingDraft,
    ) -> Result<Option<Booking>, RepoError> {
        let mut tx = pool.begin().await?;

        if Self::overlap_exists(&mut *tx, owner_id, draft.time_range(), Some(id)).await? {
            return Err(RepoError::Overlap);
        }

        let query = format!(
            "UPDATE bookings SET
                title = $2,
                description = $3,
                start_time = $4,
                end_time = $5,
                client_id = $6,
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let booking = sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(draft.start_time)
            .bind(draft.end_time)
            .bind(draft.client_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(RepoError::from_write)?;

        tx.commit().await?;
        Ok(booking)
    }

    /// Delete a booking by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
