pub const LOGIN_URL: &str = "/login";
pub const LOGOUT_URL: &str = "/logout";
pub const DASHBOARD_URL: &str = "/dashboard";
pub const ADMIN_URL: &str = "/admin";

pub const USER_SESSION_COOKIE_NAME: &str = "user_session";

pub fn start_attempt_url(category_id: i64) -> String {
    format!("/start-attempt/{category_id}")
}

pub fn take_quiz_url(attempt_id: i64) -> String {
    format!("/attempt/{attempt_id}")
}

pub fn question_url(attempt_id: i64, answer_id: i64) -> String {
    format!("/attempt/{attempt_id}/question/{answer_id}")
}

pub fn flag_url(answer_id: i64) -> String {
    format!("/answer/{answer_id}/flag")
}

pub fn review_url(attempt_id: i64) -> String {
    format!("/attempt/{attempt_id}/review")
}

pub fn submit_url(attempt_id: i64) -> String {
    format!("/attempt/{attempt_id}/submit")
}

pub fn results_url(attempt_id: i64) -> String {
    format!("/attempt/{attempt_id}/results")
}

pub fn delete_question_url(question_id: i64) -> String {
    format!("/admin/question/{question_id}/delete")
}

// Attempt defaults
pub const QUESTIONS_PER_ATTEMPT: usize = 10;
pub const DEFAULT_PASSING_SCORE: i64 = 70;
pub const RECENT_ATTEMPTS_LIMIT: i64 = 5;
