mod helpers;
mod ride_api;
mod user_api;

use sqlx::{Executor, Pool, Postgres};

use crate::{api::API, error::Error};

type Database = Postgres;

pub struct Engine {
    pool: Pool<Database>,
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub async fn new(pool: Pool<Database>) -> Result<Self, Error> {
        // ride store (document store)
        pool.execute("CREATE TABLE IF NOT EXISTS rides (id UUID PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        // user store (document store)
        pool.execute("CREATE TABLE IF NOT EXISTS users (id UUID PRIMARY KEY, data JSONB NOT NULL)")
            .await?;

        Ok(Self { pool })
    }
}

impl API for Engine {}
