use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

pub async fn connect(db_uri: &str, max_connections: u32) -> Result<Pool<Postgres>, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(db_uri)
        .await?;

    Ok(pool)
}
