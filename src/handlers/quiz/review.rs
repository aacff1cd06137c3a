use axum::extract::{Path, State};
use maud::Markup;

use crate::{
    extractors::AuthGuard,
    rejections::AppError,
    views,
    views::quiz as quiz_views,
    AppState,
};

pub(crate) async fn review_panel(
    AuthGuard(user): AuthGuard,
    State(state): State<AppState>,
    Path(attempt_id): Path<i64>,
) -> Result<Markup, AppError> {
    state.db.attempt_for_user(attempt_id, user.id).await?;

    let entries = state.db.review_states(attempt_id).await?;

    Ok(views::titled(
        "Review",
        quiz_views::review_panel(quiz_views::ReviewData {
            attempt_id,
            entries,
        }),
    ))
}
