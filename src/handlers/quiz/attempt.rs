use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use maud::Markup;

use crate::{
    db::QuizError,
    extractors::{AuthGuard, IsHtmx},
    names,
    rejections::{AppError, ResultExt},
    views,
    views::quiz as quiz_views,
    AppState,
};

pub(crate) async fn start_attempt(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(category_id): Path<i64>,
) -> Result<axum::response::Response, AppError> {
    let attempt = match state.db.create_attempt(user.id, category_id).await {
        Ok(attempt) => attempt,
        Err(QuizError::EmptyPool) => {
            tracing::warn!("no active questions for category={category_id}");
            let category_name = state
                .db
                .category_name(category_id)
                .await
                .reject("could not get category name")?;

            let notice = views::titled("Quiz", quiz_views::empty_pool_notice(&category_name));
            return Ok(notice.into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let page = question_page(&state, attempt.id, attempt.category_id).await?;
    Ok(views::titled("Quiz", page).into_response())
}

pub(crate) async fn take_quiz(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
    Path(attempt_id): Path<i64>,
) -> Result<axum::response::Response, AppError> {
    let attempt = state.db.attempt_for_user(attempt_id, user.id).await?;

    // A finished attempt only has results to show.
    if attempt.is_completed() {
        return Ok(Redirect::to(&names::results_url(attempt_id)).into_response());
    }

    let page = question_page(&state, attempt_id, attempt.category_id).await?;
    Ok(views::render(is_htmx, "Quiz", page).into_response())
}

pub(crate) async fn submit_attempt(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(attempt_id): Path<i64>,
) -> Result<Markup, AppError> {
    state.db.attempt_for_user(attempt_id, user.id).await?;

    let summary = state.db.submit_attempt(attempt_id).await?;

    // Re-read for the freshly written score and completion time.
    let attempt = state.db.attempt_for_user(attempt_id, user.id).await?;
    let category_name = state
        .db
        .category_name(attempt.category_id)
        .await
        .reject("could not get category name")?;

    Ok(views::titled(
        "Results",
        quiz_views::results(quiz_views::ResultsData {
            attempt,
            category_name,
            breakdown: summary.breakdown,
        }),
    ))
}

pub(crate) async fn results(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
    Path(attempt_id): Path<i64>,
) -> Result<axum::response::Response, AppError> {
    let attempt = state.db.attempt_for_user(attempt_id, user.id).await?;

    if !attempt.is_completed() {
        return Ok(Redirect::to(&names::take_quiz_url(attempt_id)).into_response());
    }

    let breakdown = state.db.attempt_breakdown(attempt_id).await?;
    let category_name = state
        .db
        .category_name(attempt.category_id)
        .await
        .reject("could not get category name")?;

    let page = quiz_views::results(quiz_views::ResultsData {
        attempt,
        category_name,
        breakdown,
    });

    Ok(views::render(is_htmx, "Results", page).into_response())
}

/// Render the question fragment at the attempt's current position (first
/// unanswered answer, or the first answer once everything is filled in).
async fn question_page(
    state: &AppState,
    attempt_id: i64,
    category_id: i64,
) -> Result<Markup, AppError> {
    let answer_id = state
        .db
        .resume_answer_id(attempt_id)
        .await
        .reject("could not find current question")?;

    let context = state.db.answer_context(attempt_id, answer_id).await?;

    let category_name = state
        .db
        .category_name(category_id)
        .await
        .reject("could not get category name")?;

    Ok(quiz_views::question(quiz_views::QuestionData {
        attempt_id,
        category_name,
        context,
    }))
}
