use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use ulid::Ulid;

use super::models::AuthUser;
use super::{Db, QuizError};

impl Db {
    pub async fn create_user(
        &self,
        username: &str,
        password: &str,
        display_name: &str,
    ) -> Result<i64, QuizError> {
        let password_hash = hash_password(password)?;

        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (username, password_hash, display_name) VALUES (?1, ?2, ?3) RETURNING id",
        )
        .bind(username)
        .bind(password_hash)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("new user created: id={user_id}, username={username}");
        Ok(user_id)
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AuthUser>, QuizError> {
        let user = sqlx::query_as::<_, AuthUser>(
            "SELECT id, username, display_name FROM users WHERE username = ?1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn verify_user_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, QuizError> {
        let stored_hash: Option<String> =
            sqlx::query_scalar("SELECT password_hash FROM users WHERE username = ?1")
                .bind(username)
                .fetch_optional(&self.pool)
                .await?;

        match stored_hash {
            Some(hash) => Ok(verify_password(password, &hash)),
            None => Ok(false),
        }
    }

    pub async fn create_user_session(&self, user_id: i64) -> Result<String, QuizError> {
        let session = Ulid::new().to_string();

        sqlx::query("INSERT INTO user_sessions (id, user_id) VALUES (?1, ?2)")
            .bind(&session)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        tracing::info!("new login session created for user_id={user_id}");
        Ok(session)
    }

    pub async fn get_user_by_session(
        &self,
        session_id: &str,
    ) -> Result<Option<AuthUser>, QuizError> {
        let user = sqlx::query_as::<_, AuthUser>(
            r#"
            SELECT u.id, u.username, u.display_name
            FROM user_sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.id = ?1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn delete_user_session(&self, session_id: &str) -> Result<(), QuizError> {
        sqlx::query("DELETE FROM user_sessions WHERE id = ?1")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String, QuizError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| QuizError::PasswordHash)?;

    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(stored_hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}
