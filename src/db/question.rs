use chrono::Utc;

use super::models::{AdminQuestionRow, NewQuestion, OptionRow, QuestionRow, QuestionType};
use super::{Db, QuizError};

impl Db {
    /// Active (non-soft-deleted) question ids for a category. This is the
    /// one place the soft-delete filter is applied; sampling and counts all
    /// go through it.
    pub async fn active_question_ids(&self, category_id: i64) -> Result<Vec<i64>, QuizError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM questions WHERE category_id = ?1 AND is_deleted = 0 ORDER BY id",
        )
        .bind(category_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Fetch a question regardless of its soft-delete state, so historical
    /// attempts keep resolving questions that have since been removed.
    pub async fn get_question(&self, question_id: i64) -> Result<QuestionRow, QuizError> {
        sqlx::query_as::<_, QuestionRow>(
            "SELECT id, category_id, text, question_type, is_deleted FROM questions WHERE id = ?1",
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(QuizError::NotFound("question"))
    }

    pub async fn get_options(&self, question_id: i64) -> Result<Vec<OptionRow>, QuizError> {
        let options = sqlx::query_as::<_, OptionRow>(
            "SELECT id, text, is_correct FROM options WHERE question_id = ?1 ORDER BY id",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(options)
    }

    pub async fn correct_option_ids(&self, question_id: i64) -> Result<Vec<i64>, QuizError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT id FROM options WHERE question_id = ?1 AND is_correct = 1 ORDER BY id",
        )
        .bind(question_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    /// Insert a question with all its options atomically. Enforces the
    /// option invariants: at least one correct option, and exactly one for
    /// single-answer questions.
    pub async fn create_question(
        &self,
        category_id: i64,
        question: NewQuestion,
    ) -> Result<i64, QuizError> {
        if question.options.is_empty() {
            return Err(QuizError::Validation("a question needs at least one option"));
        }

        let correct = question.options.iter().filter(|o| o.is_correct).count();
        if correct == 0 {
            return Err(QuizError::Validation(
                "at least one option must be marked correct",
            ));
        }
        if question.question_type == QuestionType::Single && correct != 1 {
            return Err(QuizError::Validation(
                "a single-answer question must have exactly one correct option",
            ));
        }

        let mut tx = self.pool.begin().await?;

        let question_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO questions (category_id, text, question_type, created_at)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id
            "#,
        )
        .bind(category_id)
        .bind(&question.text)
        .bind(question.question_type)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        for option in &question.options {
            sqlx::query("INSERT INTO options (question_id, text, is_correct) VALUES (?1, ?2, ?3)")
                .bind(question_id)
                .bind(&option.text)
                .bind(option.is_correct)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("new question created: id={question_id}, category_id={category_id}");
        Ok(question_id)
    }

    /// Soft delete: the question stops appearing in new samples but stays
    /// readable for attempts that already reference it.
    pub async fn soft_delete_question(&self, question_id: i64) -> Result<(), QuizError> {
        let affected = sqlx::query(
            "UPDATE questions SET is_deleted = 1, deleted_at = ?1 WHERE id = ?2",
        )
        .bind(Utc::now())
        .bind(question_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(QuizError::NotFound("question"));
        }

        tracing::info!("question soft-deleted: id={question_id}");
        Ok(())
    }

    /// All questions (deleted included) for the content page, newest first.
    pub async fn questions_for_admin(&self) -> Result<Vec<AdminQuestionRow>, QuizError> {
        let questions = sqlx::query_as::<_, AdminQuestionRow>(
            r#"
            SELECT q.id, c.name AS category_name, q.text, q.question_type, q.is_deleted
            FROM questions q
            JOIN categories c ON c.id = q.category_id
            ORDER BY q.created_at DESC, q.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(questions)
    }
}
