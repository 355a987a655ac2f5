use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Executor, Row};
use uuid::Uuid;

use crate::{
    api::UserAPI,
    entities::{NewUser, User},
    error::{not_found_error, Error},
};

#[async_trait]
impl UserAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_user(&self, id: Uuid) -> Result<User, Error> {
        let mut conn = self.pool.acquire().await?;

        let maybe_result = conn
            .fetch_optional(sqlx::query("SELECT data FROM users WHERE id = $1").bind(&id))
            .await?;

        let result = maybe_result.ok_or_else(|| not_found_error("user"))?;
        let Json(user) = result.try_get("data")?;

        Ok(user)
    }

    #[tracing::instrument(skip(self))]
    async fn create_user(&self, details: NewUser) -> Result<User, Error> {
        let user = User::new(details);

        let mut conn = self.pool.acquire().await?;

        conn.execute(
            sqlx::query("INSERT INTO users (id, data) VALUES ($1, $2)")
                .bind(&user.id)
                .bind(Json(&user)),
        )
        .await?;

        Ok(user)
    }
}
