use chrono::Utc;
use rand::seq::SliceRandom;

use super::models::{AnswerContext, AttemptRow, OptionWithSelection, QuestionType, RecentAttemptRow};
use super::{Db, QuizError};
use crate::names;
use crate::scoring::{self, AnswerSheet, ScoreSummary};

#[derive(sqlx::FromRow)]
struct AnswerContextRow {
    answer_id: i64,
    question_id: i64,
    question_text: String,
    question_type: QuestionType,
    flagged: bool,
}

impl Db {
    /// Create a new attempt: sample up to `names::QUESTIONS_PER_ATTEMPT`
    /// distinct active questions, then insert the attempt row and one
    /// placeholder answer per question in a single transaction, so
    /// `total_questions` can never drift from the answer count.
    pub async fn create_attempt(
        &self,
        user_id: i64,
        category_id: i64,
    ) -> Result<AttemptRow, QuizError> {
        // A bogus category id is NotFound, not an empty pool.
        self.category_name(category_id).await?;

        // Sample before the transaction (read-only).
        let mut question_ids = self.active_question_ids(category_id).await?;
        if question_ids.is_empty() {
            return Err(QuizError::EmptyPool);
        }
        question_ids.shuffle(&mut rand::thread_rng());
        question_ids.truncate(names::QUESTIONS_PER_ATTEMPT);

        let total_questions = question_ids.len() as i64;

        let mut tx = self.pool.begin().await?;

        let attempt_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO attempts (user_id, category_id, total_questions, passing_score, started_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(category_id)
        .bind(total_questions)
        .bind(names::DEFAULT_PASSING_SCORE)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for question_id in &question_ids {
            sqlx::query("INSERT INTO answers (attempt_id, question_id) VALUES (?1, ?2)")
                .bind(attempt_id)
                .bind(question_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(
            "attempt created for category={category_id}: attempt_id={attempt_id}, questions={total_questions}, user_id={user_id}"
        );

        self.get_attempt(attempt_id).await
    }

    pub async fn get_attempt(&self, attempt_id: i64) -> Result<AttemptRow, QuizError> {
        sqlx::query_as::<_, AttemptRow>(
            r#"
            SELECT id, user_id, category_id, total_questions, passing_score,
                   score, passed, started_at, completed_at
            FROM attempts
            WHERE id = ?1
            "#,
        )
        .bind(attempt_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(QuizError::NotFound("attempt"))
    }

    /// Owner-scoped fetch: someone else's attempt id behaves as missing.
    pub async fn attempt_for_user(
        &self,
        attempt_id: i64,
        user_id: i64,
    ) -> Result<AttemptRow, QuizError> {
        let attempt = self.get_attempt(attempt_id).await?;
        if attempt.user_id != user_id {
            return Err(QuizError::NotFound("attempt"));
        }

        Ok(attempt)
    }

    /// Ordered answer ids for an attempt. Navigation, the review panel and
    /// the result breakdown all follow this order.
    pub async fn answer_ids(&self, attempt_id: i64) -> Result<Vec<i64>, QuizError> {
        let ids: Vec<i64> =
            sqlx::query_scalar("SELECT id FROM answers WHERE attempt_id = ?1 ORDER BY id")
                .bind(attempt_id)
                .fetch_all(&self.pool)
                .await?;

        Ok(ids)
    }

    /// The first unanswered answer, falling back to the first answer.
    /// This is where the take-quiz page drops the user.
    pub async fn resume_answer_id(&self, attempt_id: i64) -> Result<i64, QuizError> {
        let unanswered: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT a.id FROM answers a
            WHERE a.attempt_id = ?1
              AND NOT EXISTS(SELECT 1 FROM answer_options ao WHERE ao.answer_id = a.id)
            ORDER BY a.id
            LIMIT 1
            "#,
        )
        .bind(attempt_id)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(answer_id) = unanswered {
            return Ok(answer_id);
        }

        sqlx::query_scalar("SELECT id FROM answers WHERE attempt_id = ?1 ORDER BY id LIMIT 1")
            .bind(attempt_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(QuizError::NotFound("answer"))
    }

    /// Everything the question fragment needs for one answer, resolving
    /// cross-question navigation. Fails NotFound when the answer does not
    /// belong to the attempt.
    pub async fn answer_context(
        &self,
        attempt_id: i64,
        answer_id: i64,
    ) -> Result<AnswerContext, QuizError> {
        let row = sqlx::query_as::<_, AnswerContextRow>(
            r#"
            SELECT a.id AS answer_id, a.question_id, a.flagged,
                   q.text AS question_text, q.question_type
            FROM answers a
            JOIN questions q ON q.id = a.question_id
            WHERE a.id = ?1 AND a.attempt_id = ?2
            "#,
        )
        .bind(answer_id)
        .bind(attempt_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(QuizError::NotFound("answer"))?;

        let siblings = self.answer_ids(attempt_id).await?;
        let position = siblings
            .iter()
            .position(|&id| id == answer_id)
            .ok_or(QuizError::NotFound("answer"))?;
        let prev_id = (position > 0).then(|| siblings[position - 1]);
        let next_id = siblings.get(position + 1).copied();

        let options = sqlx::query_as::<_, OptionWithSelection>(
            r#"
            SELECT o.id, o.text,
                   EXISTS(
                       SELECT 1 FROM answer_options ao
                       WHERE ao.option_id = o.id AND ao.answer_id = ?1
                   ) AS is_selected
            FROM options o
            WHERE o.question_id = ?2
            ORDER BY o.id
            "#,
        )
        .bind(answer_id)
        .bind(row.question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(AnswerContext {
            answer_id: row.answer_id,
            question_id: row.question_id,
            question_text: row.question_text,
            question_type: row.question_type,
            flagged: row.flagged,
            options,
            position: position as i64,
            total: siblings.len() as i64,
            prev_id,
            next_id,
        })
    }

    /// Submit the attempt: score it and mark it completed in one
    /// transaction. A second submit fails AttemptClosed and leaves the
    /// stored score, passed flag and completion time untouched.
    pub async fn submit_attempt(&self, attempt_id: i64) -> Result<ScoreSummary, QuizError> {
        let mut tx = self.pool.begin().await?;

        let attempt: AttemptRow = sqlx::query_as(
            r#"
            SELECT id, user_id, category_id, total_questions, passing_score,
                   score, passed, started_at, completed_at
            FROM attempts
            WHERE id = ?1
            "#,
        )
        .bind(attempt_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(QuizError::NotFound("attempt"))?;

        if attempt.completed_at.is_some() {
            return Err(QuizError::AttemptClosed);
        }

        let sheets = answer_sheets(&mut tx, attempt_id).await?;
        let summary = scoring::evaluate(&sheets, attempt.passing_score);

        sqlx::query("UPDATE attempts SET score = ?1, passed = ?2, completed_at = ?3 WHERE id = ?4")
            .bind(summary.score)
            .bind(summary.passed)
            .bind(Utc::now())
            .bind(attempt_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "attempt submitted: attempt_id={attempt_id}, score={}, passed={}",
            summary.score,
            summary.passed
        );
        Ok(summary)
    }

    /// Per-question correctness for a completed attempt, recomputed from
    /// the frozen answer rows for the results page.
    pub async fn attempt_breakdown(
        &self,
        attempt_id: i64,
    ) -> Result<Vec<scoring::QuestionResult>, QuizError> {
        let mut conn = self.pool.acquire().await?;
        let sheets = answer_sheets(&mut *conn, attempt_id).await?;

        Ok(scoring::breakdown(&sheets))
    }

    /// The user's most recently completed attempts, for the dashboard.
    pub async fn recent_attempts(
        &self,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<RecentAttemptRow>, QuizError> {
        let attempts = sqlx::query_as::<_, RecentAttemptRow>(
            r#"
            SELECT a.id, c.name AS category_name, a.score, a.passed, a.completed_at
            FROM attempts a
            JOIN categories c ON c.id = a.category_id
            WHERE a.user_id = ?1 AND a.completed_at IS NOT NULL
            ORDER BY a.completed_at DESC, a.id DESC
            LIMIT ?2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(attempts)
    }
}

/// Gather one sheet per answer: the selected option id set and the
/// question's correct option id set.
async fn answer_sheets(
    conn: &mut sqlx::SqliteConnection,
    attempt_id: i64,
) -> Result<Vec<AnswerSheet>, QuizError> {
    let answers: Vec<(i64, i64, String)> = sqlx::query_as(
        r#"
        SELECT a.id, a.question_id, q.text
        FROM answers a
        JOIN questions q ON q.id = a.question_id
        WHERE a.attempt_id = ?1
        ORDER BY a.id
        "#,
    )
    .bind(attempt_id)
    .fetch_all(&mut *conn)
    .await?;

    let selected: Vec<(i64, i64)> = sqlx::query_as(
        r#"
        SELECT ao.answer_id, ao.option_id
        FROM answer_options ao
        JOIN answers a ON a.id = ao.answer_id
        WHERE a.attempt_id = ?1
        "#,
    )
    .bind(attempt_id)
    .fetch_all(&mut *conn)
    .await?;

    let correct: Vec<(i64, i64)> = sqlx::query_as(
        r#"
        SELECT a.id, o.id
        FROM answers a
        JOIN options o ON o.question_id = a.question_id AND o.is_correct = 1
        WHERE a.attempt_id = ?1
        "#,
    )
    .bind(attempt_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut sheets: Vec<AnswerSheet> = answers
        .into_iter()
        .map(|(answer_id, question_id, question_text)| AnswerSheet {
            answer_id,
            question_id,
            question_text,
            selected: Default::default(),
            correct: Default::default(),
        })
        .collect();

    for (answer_id, option_id) in selected {
        if let Some(sheet) = sheets.iter_mut().find(|s| s.answer_id == answer_id) {
            sheet.selected.insert(option_id);
        }
    }
    for (answer_id, option_id) in correct {
        if let Some(sheet) = sheets.iter_mut().find(|s| s.answer_id == answer_id) {
            sheet.correct.insert(option_id);
        }
    }

    Ok(sheets)
}
