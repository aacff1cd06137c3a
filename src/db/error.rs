use thiserror::Error;

/// Errors surfaced by the quiz engine and its repositories.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The category has no active questions, so an attempt cannot start.
    #[error("no active questions in this category")]
    EmptyPool,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(&'static str),

    /// The attempt has been submitted; mutations and resubmission are rejected.
    #[error("attempt is already completed")]
    AttemptClosed,

    #[error("password hashing failed")]
    PasswordHash,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
