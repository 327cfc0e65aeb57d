//! Repository error type.

/// Errors surfaced by the guarded booking writes.
///
/// `Overlap` is a first-class outcome rather than an exception: `create`
/// and `update` report it when the candidate range intersects an existing
/// booking for the same user, whether the in-transaction check or the
/// database exclusion constraint caught it.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("overlapping booking exists")]
    Overlap,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl RepoError {
    /// Classify a write failure: an exclusion-constraint violation
    /// (SQLSTATE 23P01) on the bookings range constraint means a concurrent
    /// writer won the race, which callers treat exactly like the in-check
    /// overlap result.
    pub(crate) fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23P01") {
                return RepoError::Overlap;
            }
        }
        RepoError::Sqlx(err)
    }
}
