// Database model structs

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Clone, sqlx::FromRow)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub display_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, sqlx::Type, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Single,
    Multiple,
}

impl QuestionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }

    pub fn is_multiple(self) -> bool {
        matches!(self, Self::Multiple)
    }
}

#[derive(sqlx::FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Active questions only; soft-deleted ones are not counted.
    pub question_count: i64,
}

#[derive(sqlx::FromRow)]
pub struct QuestionRow {
    pub id: i64,
    pub category_id: i64,
    pub text: String,
    pub question_type: QuestionType,
    pub is_deleted: bool,
}

#[derive(sqlx::FromRow)]
pub struct OptionRow {
    pub id: i64,
    pub text: String,
    pub is_correct: bool,
}

#[derive(sqlx::FromRow)]
pub struct OptionWithSelection {
    pub id: i64,
    pub text: String,
    pub is_selected: bool,
}

#[derive(sqlx::FromRow)]
pub struct AttemptRow {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub total_questions: i64,
    pub passing_score: i64,
    pub score: Option<i64>,
    pub passed: bool,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl AttemptRow {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

#[derive(sqlx::FromRow)]
pub struct AnswerRow {
    pub id: i64,
    pub attempt_id: i64,
    pub question_id: i64,
    pub flagged: bool,
    pub answered_at: Option<DateTime<Utc>>,
}

/// Everything the question fragment needs for one answer, including the
/// sibling window for prev/next navigation.
pub struct AnswerContext {
    pub answer_id: i64,
    pub question_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub flagged: bool,
    pub options: Vec<OptionWithSelection>,
    /// 0-based position among the attempt's answers, ordered by answer id.
    pub position: i64,
    pub total: i64,
    pub prev_id: Option<i64>,
    pub next_id: Option<i64>,
}

impl AnswerContext {
    pub fn is_last(&self) -> bool {
        self.next_id.is_none()
    }
}

#[derive(sqlx::FromRow)]
pub struct ReviewEntry {
    pub answer_id: i64,
    pub answered: bool,
    pub flagged: bool,
}

#[derive(sqlx::FromRow)]
pub struct RecentAttemptRow {
    pub id: i64,
    pub category_name: String,
    pub score: i64,
    pub passed: bool,
    pub completed_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
pub struct AdminQuestionRow {
    pub id: i64,
    pub category_name: String,
    pub text: String,
    pub question_type: QuestionType,
    pub is_deleted: bool,
}

// Input shapes for content creation (admin form and the seed binary).

pub struct NewQuestion {
    pub text: String,
    pub question_type: QuestionType,
    pub options: Vec<NewOption>,
}

pub struct NewOption {
    pub text: String,
    pub is_correct: bool,
}
