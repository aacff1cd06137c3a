use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{html, Markup};

use crate::db::QuizError;
use crate::views;

/// Application-level rejection; every handler failure becomes one of these.
#[derive(Debug)]
pub enum AppError {
    NotFound,
    Unauthorized,
    BadRequest(&'static str),
    AttemptClosed,
    Internal(&'static str),
}

impl From<QuizError> for AppError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::NotFound(_) => AppError::NotFound,
            QuizError::Validation(message) => AppError::BadRequest(message),
            QuizError::AttemptClosed => AppError::AttemptClosed,
            QuizError::EmptyPool => AppError::BadRequest("no active questions in this category"),
            QuizError::Database(e) => {
                tracing::error!("database error: {e}");
                AppError::Internal("database error")
            }
            QuizError::PasswordHash => AppError::Internal("password hashing failed"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::AttemptClosed => (StatusCode::CONFLICT, "attempt is already completed"),
            AppError::Internal(message) => {
                tracing::error!("internal error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR")
            }
        };

        (code, error_page(message)).into_response()
    }
}

fn error_page(message: &str) -> Markup {
    views::titled(
        "Error",
        html! {
            article {
                h1 { (message) }
            }
        },
    )
}

/// Log-and-map extension for failures that should surface as a generic
/// internal error.
pub trait ResultExt<T> {
    fn reject(self, msg: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, msg: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{msg}: {e}");
            AppError::Internal(msg)
        })
    }
}
