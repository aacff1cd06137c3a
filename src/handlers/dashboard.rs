use axum::{
    extract::State,
    response::Redirect,
    routing::get,
    Router,
};
use maud::Markup;

use crate::{
    extractors::{AuthGuard, IsHtmx},
    names,
    rejections::{AppError, ResultExt},
    views,
    views::dashboard as dashboard_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route(names::DASHBOARD_URL, get(dashboard_page))
}

async fn index() -> Redirect {
    Redirect::to(names::DASHBOARD_URL)
}

async fn dashboard_page(
    AuthGuard(user): AuthGuard,
    IsHtmx(is_htmx): IsHtmx,
    State(state): State<AppState>,
) -> Result<Markup, AppError> {
    let categories = state
        .db
        .categories()
        .await
        .reject("could not load categories")?;

    let recent = state
        .db
        .recent_attempts(user.id, names::RECENT_ATTEMPTS_LIMIT)
        .await
        .reject("could not load recent attempts")?;

    let content = dashboard_views::dashboard(dashboard_views::DashboardData {
        user_name: user.display_name,
        categories,
        recent,
    });

    Ok(views::render(is_htmx, "Dashboard", content))
}
