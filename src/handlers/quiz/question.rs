use axum::extract::{Path, State};
use axum_extra::extract::Form;
use maud::Markup;

use crate::{
    extractors::AuthGuard,
    rejections::{AppError, ResultExt},
    views,
    views::quiz as quiz_views,
    AppState,
};

pub(crate) async fn question_view(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path((attempt_id, answer_id)): Path<(i64, i64)>,
) -> Result<Markup, AppError> {
    let attempt = state.db.attempt_for_user(attempt_id, user.id).await?;
    let context = state.db.answer_context(attempt_id, answer_id).await?;

    let category_name = state
        .db
        .category_name(attempt.category_id)
        .await
        .reject("could not get category name")?;

    Ok(views::titled(
        "Quiz",
        quiz_views::question(quiz_views::QuestionData {
            attempt_id,
            category_name,
            context,
        }),
    ))
}

pub(crate) async fn submit_answer(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path((attempt_id, answer_id)): Path<(i64, i64)>,
    Form(body): Form<super::AnswerBody>,
) -> Result<Markup, AppError> {
    let attempt = state.db.attempt_for_user(attempt_id, user.id).await?;

    // Membership check before any mutation.
    state.db.answer_context(attempt_id, answer_id).await?;

    state
        .db
        .record_selection(answer_id, body.option_ids())
        .await?;

    // Echo the stored state back.
    let context = state.db.answer_context(attempt_id, answer_id).await?;

    let category_name = state
        .db
        .category_name(attempt.category_id)
        .await
        .reject("could not get category name")?;

    Ok(views::titled(
        "Quiz",
        quiz_views::question(quiz_views::QuestionData {
            attempt_id,
            category_name,
            context,
        }),
    ))
}

pub(crate) async fn toggle_flag(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(answer_id): Path<i64>,
) -> Result<Markup, AppError> {
    let answer = state.db.get_answer(answer_id).await?;
    state.db.attempt_for_user(answer.attempt_id, user.id).await?;

    let flagged = state.db.toggle_flag(answer_id).await?;

    Ok(quiz_views::flag_button(answer_id, flagged))
}
