mod attempt;
mod question;
mod review;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::AppState;

#[derive(Deserialize)]
pub(crate) struct AnswerBody {
    #[serde(default)]
    options: Vec<i64>,
}

impl AnswerBody {
    pub(crate) fn option_ids(&self) -> &[i64] {
        &self.options
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/start-attempt/{category_id}", post(attempt::start_attempt))
        .route("/attempt/{attempt_id}", get(attempt::take_quiz))
        .route(
            "/attempt/{attempt_id}/question/{answer_id}",
            get(question::question_view).post(question::submit_answer),
        )
        .route("/answer/{answer_id}/flag", post(question::toggle_flag))
        .route("/attempt/{attempt_id}/review", get(review::review_panel))
        .route("/attempt/{attempt_id}/submit", post(attempt::submit_attempt))
        .route("/attempt/{attempt_id}/results", get(attempt::results))
}
