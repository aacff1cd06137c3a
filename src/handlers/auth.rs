use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, HeaderName},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use axum_extra::extract::{CookieJar, Form};
use serde::Deserialize;

use crate::{
    names,
    rejections::{AppError, ResultExt},
    utils, views,
    views::auth as auth_views,
    AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(names::LOGIN_URL, get(login_page).post(login_post))
        .route(names::LOGOUT_URL, post(logout_post))
}

async fn login_page() -> maud::Markup {
    views::page("Log in", auth_views::login_page(auth_views::LoginState::Fresh))
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

async fn login_post(
    State(state): State<AppState>,
    Form(body): Form<LoginBody>,
) -> Result<axum::response::Response, AppError> {
    let valid = state
        .db
        .verify_user_password(&body.username, &body.password)
        .await
        .reject("could not verify password")?;

    if !valid {
        tracing::warn!("failed login for username={}", body.username);
        let page = views::titled(
            "Log in",
            auth_views::login_page(auth_views::LoginState::BadCredentials),
        );
        return Ok(page.into_response());
    }

    let user = state
        .db
        .find_user_by_username(&body.username)
        .await
        .reject("could not load user")?
        .ok_or(AppError::Unauthorized)?;

    let session = state
        .db
        .create_user_session(user.id)
        .await
        .reject("could not create login session")?;

    let cookie = utils::cookie(names::USER_SESSION_COOKIE_NAME, &session, state.secure_cookies);
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie.parse().unwrap());
    headers.insert(
        HeaderName::from_static("hx-redirect"),
        names::DASHBOARD_URL.parse().unwrap(),
    );

    Ok((headers, ()).into_response())
}

async fn logout_post(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<axum::response::Response, AppError> {
    if let Some(cookie) = jar.get(names::USER_SESSION_COOKIE_NAME) {
        state
            .db
            .delete_user_session(cookie.value())
            .await
            .reject("could not delete login session")?;
    }

    let cleared = utils::cookie(names::USER_SESSION_COOKIE_NAME, "", state.secure_cookies);
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cleared.parse().unwrap());
    headers.insert(
        HeaderName::from_static("hx-redirect"),
        names::LOGIN_URL.parse().unwrap(),
    );

    Ok((headers, ()).into_response())
}
