mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use quizcraft::{names, router, AppState};
use tower::ServiceExt;

#[tokio::test]
async fn protected_routes_reject_requests_without_a_session_cookie() {
    let db = common::create_test_db().await;
    let app = router(AppState {
        db,
        secure_cookies: false,
    });

    let cases = [
        (Method::GET, "/dashboard"),
        (Method::GET, "/attempt/1"),
        (Method::GET, "/attempt/1/question/1"),
        (Method::GET, "/attempt/1/review"),
        (Method::GET, "/attempt/1/results"),
        (Method::GET, "/admin"),
    ];

    for (method, uri) in cases {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request build should succeed"),
            )
            .await
            .expect("router should respond");

        assert_eq!(
            resp.status(),
            StatusCode::UNAUTHORIZED,
            "expected UNAUTHORIZED for {uri}",
        );
    }
}

#[tokio::test]
async fn state_changing_requests_without_the_htmx_header_are_rejected() {
    let db = common::create_test_db().await;
    let app = router(AppState {
        db,
        secure_cookies: false,
    });

    let cases = [
        (Method::POST, "/start-attempt/1"),
        (Method::POST, "/attempt/1/submit"),
        (Method::POST, "/answer/1/flag"),
        (Method::POST, "/admin/category"),
    ];

    for (method, uri) in cases {
        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .body(Body::empty())
                    .expect("request build should succeed"),
            )
            .await
            .expect("router should respond");

        assert_eq!(
            resp.status(),
            StatusCode::FORBIDDEN,
            "expected FORBIDDEN for {uri}",
        );
    }
}

#[tokio::test]
async fn dashboard_accepts_a_valid_session_cookie() {
    let db = common::create_test_db().await;
    let user_id = db
        .create_user("guard", "guard-pass-1", "Guard")
        .await
        .expect("create user");
    let session = db
        .create_user_session(user_id)
        .await
        .expect("create login session");

    let app = router(AppState {
        db,
        secure_cookies: false,
    });

    let req = Request::builder()
        .method(Method::GET)
        .uri("/dashboard")
        .header(
            header::COOKIE,
            format!("{}={}", names::USER_SESSION_COOKIE_NAME, session),
        )
        .body(Body::empty())
        .expect("request build should succeed");

    let resp = app.oneshot(req).await.expect("router should respond");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn login_page_is_public() {
    let db = common::create_test_db().await;
    let app = router(AppState {
        db,
        secure_cookies: false,
    });

    let resp = app
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri(names::LOGIN_URL)
                .body(Body::empty())
                .expect("request build should succeed"),
        )
        .await
        .expect("router should respond");

    assert_eq!(resp.status(), StatusCode::OK);
}
