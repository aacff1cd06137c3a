use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::models::{AnswerRow, QuestionType, ReviewEntry};
use super::{Db, QuizError};

impl Db {
    pub async fn get_answer(&self, answer_id: i64) -> Result<AnswerRow, QuizError> {
        sqlx::query_as::<_, AnswerRow>(
            "SELECT id, attempt_id, question_id, flagged, answered_at FROM answers WHERE id = ?1",
        )
        .bind(answer_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(QuizError::NotFound("answer"))
    }

    /// Replace the answer's selection set wholesale. Each call is one
    /// transaction against the single answer row, so racing submissions on
    /// the same answer serialize and the stored state always matches the
    /// last commit, never a merge of two partial updates.
    pub async fn record_selection(
        &self,
        answer_id: i64,
        option_ids: &[i64],
    ) -> Result<(), QuizError> {
        // Duplicate ids from repeated form fields collapse to one.
        let mut seen = HashSet::new();
        let option_ids: Vec<i64> = option_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        let mut tx = self.pool.begin().await?;

        let row: Option<(i64, QuestionType, Option<DateTime<Utc>>)> = sqlx::query_as(
            r#"
            SELECT a.question_id, q.question_type, att.completed_at
            FROM answers a
            JOIN questions q ON q.id = a.question_id
            JOIN attempts att ON att.id = a.attempt_id
            WHERE a.id = ?1
            "#,
        )
        .bind(answer_id)
        .fetch_optional(&mut *tx)
        .await?;

        let (question_id, question_type, completed_at) =
            row.ok_or(QuizError::NotFound("answer"))?;

        if completed_at.is_some() {
            return Err(QuizError::AttemptClosed);
        }

        if question_type == QuestionType::Single && option_ids.len() > 1 {
            return Err(QuizError::Validation(
                "a single-answer question takes at most one option",
            ));
        }

        let known: Vec<i64> = sqlx::query_scalar("SELECT id FROM options WHERE question_id = ?1")
            .bind(question_id)
            .fetch_all(&mut *tx)
            .await?;
        let known: HashSet<i64> = known.into_iter().collect();
        if option_ids.iter().any(|id| !known.contains(id)) {
            return Err(QuizError::Validation(
                "option does not belong to this question",
            ));
        }

        // Wholesale replace, never an incremental merge.
        sqlx::query("DELETE FROM answer_options WHERE answer_id = ?1")
            .bind(answer_id)
            .execute(&mut *tx)
            .await?;

        for option_id in &option_ids {
            sqlx::query("INSERT INTO answer_options (answer_id, option_id) VALUES (?1, ?2)")
                .bind(answer_id)
                .bind(option_id)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("UPDATE answers SET answered_at = ?1 WHERE id = ?2")
            .bind(Utc::now())
            .bind(answer_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            "selection recorded for answer={answer_id}: {} option(s)",
            option_ids.len()
        );
        Ok(())
    }

    /// Flip the flag and return the new state. Selection state and
    /// answered_at are untouched.
    pub async fn toggle_flag(&self, answer_id: i64) -> Result<bool, QuizError> {
        let mut tx = self.pool.begin().await?;

        let completed_at: Option<Option<DateTime<Utc>>> = sqlx::query_scalar(
            r#"
            SELECT att.completed_at
            FROM answers a
            JOIN attempts att ON att.id = a.attempt_id
            WHERE a.id = ?1
            "#,
        )
        .bind(answer_id)
        .fetch_optional(&mut *tx)
        .await?;

        let completed_at = completed_at.ok_or(QuizError::NotFound("answer"))?;
        if completed_at.is_some() {
            return Err(QuizError::AttemptClosed);
        }

        sqlx::query("UPDATE answers SET flagged = NOT flagged WHERE id = ?1")
            .bind(answer_id)
            .execute(&mut *tx)
            .await?;

        let flagged: bool = sqlx::query_scalar("SELECT flagged FROM answers WHERE id = ?1")
            .bind(answer_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("flag toggled for answer={answer_id}: flagged={flagged}");
        Ok(flagged)
    }

    /// Answered/flagged state per answer, derived fresh on every call so
    /// the review panel always reflects the latest recorded selections.
    pub async fn review_states(&self, attempt_id: i64) -> Result<Vec<ReviewEntry>, QuizError> {
        let entries = sqlx::query_as::<_, ReviewEntry>(
            r#"
            SELECT a.id AS answer_id,
                   EXISTS(SELECT 1 FROM answer_options ao WHERE ao.answer_id = a.id) AS answered,
                   a.flagged
            FROM answers a
            WHERE a.attempt_id = ?1
            ORDER BY a.id
            "#,
        )
        .bind(attempt_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn selected_option_ids(&self, answer_id: i64) -> Result<Vec<i64>, QuizError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT option_id FROM answer_options WHERE answer_id = ?1 ORDER BY option_id",
        )
        .bind(answer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
