//! Handlers for the booking lifecycle.
//!
//! Every operation receives the authenticated user explicitly and consults
//! the overlap guard before persisting; conflicts surface as a dedicated
//! 409 response.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use slotbook_core::booking::{self, BookingDraft, BookingInput, FieldErrors};
use slotbook_core::error::CoreError;
use slotbook_core::types::DbId;
use slotbook_db::models::client::Client;
use slotbook_db::repositories::{BookingRepo, ClientRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Page, UpdatedResponse};
use crate::state::AppState;

const CLIENT_INVALID: &str = "The selected client id is invalid.";

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the paginated listing.
#[derive(Debug, serde::Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
}

/// Query parameters for the weekly listing.
#[derive(Debug, serde::Deserialize)]
pub struct WeekParams {
    pub week: Option<String>,
    pub page: Option<i64>,
}

/// The booking page plus the client list for the booking form.
#[derive(Debug, serde::Serialize)]
pub struct IndexResponse<T: serde::Serialize> {
    #[serde(flatten)]
    pub bookings: Page<T>,
    pub clients: Vec<Client>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /bookings?page=
///
/// The caller's bookings, newest-created-first, with the full client list
/// (ordered by name) for populating the selection UI.
pub async fn index(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page.unwrap_or(1).max(1);
    let (bookings, total) = BookingRepo::list_page(&state.pool, auth.user_id, page).await?;
    let clients = ClientRepo::list(&state.pool).await?;

    Ok(Json(IndexResponse {
        bookings: Page::new("/api/v1/bookings", bookings, page, total),
        clients,
    }))
}

/// GET /bookings/by-weeks?week=YYYY-MM-DD&page=
///
/// Bookings starting inside the Monday-to-Sunday week containing `week`,
/// ascending, joined with client and owning user.
pub async fn by_weeks(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<WeekParams>,
) -> AppResult<impl IntoResponse> {
    let raw = params
        .week
        .ok_or_else(|| AppError::Unprocessable("The week query parameter is required.".into()))?;
    let date = booking::parse_week_date(&raw).map_err(AppError::Unprocessable)?;
    let (week_start, week_end) = booking::week_bounds(date);

    let page = params.page.unwrap_or(1).max(1);
    let (bookings, total) =
        BookingRepo::list_week(&state.pool, auth.user_id, week_start, week_end, page).await?;

    let path = format!("/api/v1/bookings/by-weeks?week={raw}");
    Ok(Json(Page::new(&path, bookings, page, total)))
}

/// POST /bookings
///
/// Create a booking owned by the authenticated user.
pub async fn store(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BookingInput>,
) -> AppResult<impl IntoResponse> {
    let draft = validate_request(&state, &input).await?;

    let booking = BookingRepo::create(&state.pool, auth.user_id, &draft).await?;

    tracing::info!(
        user_id = auth.user_id,
        booking_id = booking.id,
        "Booking created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: booking })))
}

/// PUT /bookings/{id}
///
/// Re-validate and apply the whitelisted fields; the overlap check
/// excludes the booking itself so keeping the same slot always succeeds.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<BookingInput>,
) -> AppResult<impl IntoResponse> {
    let existing = BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    let draft = validate_request(&state, &input).await?;

    let booking = BookingRepo::update(&state.pool, id, existing.user_id, &draft)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Booking",
            id,
        }))?;

    tracing::info!(user_id = auth.user_id, booking_id = id, "Booking updated");

    Ok(Json(UpdatedResponse {
        data: booking,
        cleared: true,
    }))
}

/// DELETE /bookings/{id}
pub async fn destroy(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = BookingRepo::delete(&state.pool, id).await?;

    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Booking",
            id,
        }
        .into());
    }

    tracing::info!(user_id = auth.user_id, booking_id = id, "Booking deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate the submitted fields and the client reference.
///
/// The client-existence lookup runs even when other fields failed, so the
/// caller sees the complete error set in one response.
async fn validate_request(state: &AppState, input: &BookingInput) -> Result<BookingDraft, AppError> {
    let validated = booking::validate_booking(input);

    let client_missing = match input.client_id {
        Some(id) => ClientRepo::find_by_id(&state.pool, id).await?.is_none(),
        // The missing-field error is already recorded by validate_booking.
        None => false,
    };

    match (validated, client_missing) {
        (Ok(draft), false) => Ok(draft),
        (Ok(_), true) => {
            let mut errors = FieldErrors::new();
            errors.push("client_id", CLIENT_INVALID);
            Err(CoreError::Validation(errors).into())
        }
        (Err(mut errors), client_missing) => {
            if client_missing {
                errors.push("client_id", CLIENT_INVALID);
            }
            Err(CoreError::Validation(errors).into())
        }
    }
}
