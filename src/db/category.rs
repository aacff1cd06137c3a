use chrono::Utc;

use super::models::CategoryRow;
use super::{Db, QuizError};

impl Db {
    pub async fn create_category(
        &self,
        name: &str,
        description: &str,
    ) -> Result<i64, QuizError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE name = ?1)")
                .bind(name)
                .fetch_one(&self.pool)
                .await?;

        if exists {
            return Err(QuizError::Validation(
                "a category with this name already exists",
            ));
        }

        let category_id: i64 = sqlx::query_scalar(
            "INSERT INTO categories (name, description, created_at) VALUES (?1, ?2, ?3) RETURNING id",
        )
        .bind(name)
        .bind(description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new category created: id={category_id}, name={name}");
        Ok(category_id)
    }

    /// Categories with their active question counts, for the dashboard and
    /// the content page.
    pub async fn categories(&self) -> Result<Vec<CategoryRow>, QuizError> {
        let categories = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT
              c.id AS id,
              c.name AS name,
              c.description AS description,
              COUNT(q.id) AS question_count
            FROM categories c
            LEFT JOIN questions q ON q.category_id = c.id AND q.is_deleted = 0
            GROUP BY c.id, c.name, c.description
            ORDER BY c.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn category_name(&self, category_id: i64) -> Result<String, QuizError> {
        sqlx::query_scalar("SELECT name FROM categories WHERE id = ?1")
            .bind(category_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(QuizError::NotFound("category"))
    }

    pub async fn find_category_id(&self, name: &str) -> Result<Option<i64>, QuizError> {
        let id: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE name = ?1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }
}
