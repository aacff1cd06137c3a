use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use axum_extra::extract::Form;
use maud::Markup;
use serde::Deserialize;

use crate::{
    db::{NewOption, NewQuestion, QuestionType},
    extractors::{AuthGuard, IsHtmx},
    names,
    rejections::{AppError, ResultExt},
    views,
    views::admin as admin_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::ADMIN_URL, get(admin_page))
        .route("/admin/category", post(create_category))
        .route("/admin/question", post(create_question))
        .route("/admin/question/{question_id}/delete", post(delete_question))
}

async fn admin_page(
    AuthGuard(_user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
) -> Result<Markup, AppError> {
    let content = admin_content(&state).await?;
    Ok(views::render(is_htmx, "Content", content))
}

#[derive(Deserialize)]
struct CategoryBody {
    name: String,
    #[serde(default)]
    description: String,
}

async fn create_category(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Form(body): Form<CategoryBody>,
) -> Result<Markup, AppError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::BadRequest("category name is required"));
    }

    state
        .db
        .create_category(name, body.description.trim())
        .await?;

    let content = admin_content(&state).await?;
    Ok(views::titled("Content", content))
}

#[derive(Deserialize)]
struct QuestionBody {
    category_id: i64,
    text: String,
    question_type: QuestionType,
    /// Option texts in row order; unused rows arrive as empty strings.
    #[serde(default)]
    options: Vec<String>,
    /// 1-based row numbers of the ticked "correct" checkboxes.
    #[serde(default)]
    correct: Vec<usize>,
}

async fn create_question(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Form(body): Form<QuestionBody>,
) -> Result<Markup, AppError> {
    let text = body.text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest("question text is required"));
    }

    let options: Vec<NewOption> = body
        .options
        .iter()
        .enumerate()
        .filter(|(_, option_text)| !option_text.trim().is_empty())
        .map(|(idx, option_text)| NewOption {
            text: option_text.trim().to_string(),
            is_correct: body.correct.contains(&(idx + 1)),
        })
        .collect();

    state
        .db
        .create_question(
            body.category_id,
            NewQuestion {
                text: text.to_string(),
                question_type: body.question_type,
                options,
            },
        )
        .await?;

    let content = admin_content(&state).await?;
    Ok(views::titled("Content", content))
}

async fn delete_question(
    AuthGuard(_user): AuthGuard,
    State(state): State<AppState>,
    Path(question_id): Path<i64>,
) -> Result<Markup, AppError> {
    state.db.soft_delete_question(question_id).await?;

    let content = admin_content(&state).await?;
    Ok(views::titled("Content", content))
}

async fn admin_content(state: &AppState) -> Result<Markup, AppError> {
    let categories = state
        .db
        .categories()
        .await
        .reject("could not load categories")?;

    let questions = state
        .db
        .questions_for_admin()
        .await
        .reject("could not load questions")?;

    Ok(admin_views::admin_page(admin_views::AdminData {
        categories,
        questions,
    }))
}
