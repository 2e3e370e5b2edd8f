//! Repository for the `users` table.

use sqlx::PgPool;

use crate::models::user::User;

const COLUMNS: &str = "id, user_name, email, created_at";

/// Read access to registered users.
pub struct UserRepo;

impl UserRepo {
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
