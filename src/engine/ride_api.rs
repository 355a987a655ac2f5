use super::helpers::{fetch_ride_for_update, fetch_user_for_update, save_ride, save_user};
use super::Engine;

use async_trait::async_trait;
use sqlx::{types::Json, Acquire, Executor, Row};
use uuid::Uuid;

use crate::{
    api::RideAPI,
    entities::{NewRide, Ride, RideListing, RidePatch, RideQuery, RideWithCreator, User},
    error::{bad_request_error, not_found_error, Error},
};

const LISTING_QUERY: &str = "
    SELECT
        r.data AS ride,
        u.data AS creator
    FROM
        rides r
        JOIN users u ON u.id = (r.data->>'creator')::uuid
";

#[async_trait]
impl RideAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn find_ride(&self, id: Uuid) -> Result<RideWithCreator, Error> {
        let mut conn = self.pool.acquire().await?;

        let query = "
            SELECT
                r.data AS ride,
                u.data AS creator
            FROM
                rides r
                JOIN users u ON u.id = (r.data->>'creator')::uuid
            WHERE
                r.id = $1
        ";

        let maybe_result = conn.fetch_optional(sqlx::query(query).bind(&id)).await?;

        let result = maybe_result.ok_or_else(|| not_found_error("ride"))?;
        let Json(ride): Json<Ride> = result.try_get("ride")?;
        let Json(creator): Json<User> = result.try_get("creator")?;

        Ok(RideWithCreator::new(ride, &creator))
    }

    #[tracing::instrument(skip(self))]
    async fn list_rides(&self) -> Result<Vec<RideListing>, Error> {
        let mut conn = self.pool.acquire().await?;

        let results = conn.fetch_all(sqlx::query(LISTING_QUERY)).await?;

        results
            .iter()
            .map(|row| {
                let Json(ride): Json<Ride> = row.try_get("ride")?;
                let Json(creator): Json<User> = row.try_get("creator")?;

                Ok(RideListing::new(ride, &creator))
            })
            .collect()
    }

    #[tracing::instrument(skip(self))]
    async fn search_rides(&self, query: RideQuery) -> Result<Vec<RideListing>, Error> {
        // validation happens before any database work
        let filters = query.validate()?;

        let sql = "
            SELECT
                r.data AS ride,
                u.data AS creator
            FROM
                rides r
                JOIN users u ON u.id = (r.data->>'creator')::uuid
            WHERE
                r.data->'origin'->>'place' ILIKE '%' || $1 || '%'
                AND r.data->'destination'->>'place' ILIKE '%' || $2 || '%'
                AND (r.data->>'availableSeats')::int4 >= $3
        ";

        let mut conn = self.pool.acquire().await?;

        let results = conn
            .fetch_all(
                sqlx::query(sql)
                    .bind(escape_like(&filters.from))
                    .bind(escape_like(&filters.to))
                    .bind(filters.seat),
            )
            .await?;

        results
            .iter()
            .map(|row| {
                let Json(ride): Json<Ride> = row.try_get("ride")?;
                let Json(creator): Json<User> = row.try_get("creator")?;

                Ok(RideListing::new(ride, &creator))
            })
            .collect()
    }

    #[tracing::instrument(skip(self))]
    async fn create_ride(&self, details: NewRide) -> Result<Ride, Error> {
        let ride = Ride::new(details);
        ride.validate()?;

        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        // the ride insert and the creator's back-reference commit together
        let mut creator = match fetch_user_for_update(&mut tx, &ride.creator).await {
            Ok(user) => user,
            Err(err) if err.code == 100 => {
                return Err(bad_request_error("creator does not exist"))
            }
            Err(err) => return Err(err),
        };

        tx.execute(
            sqlx::query("INSERT INTO rides (id, data) VALUES ($1, $2)")
                .bind(&ride.id)
                .bind(Json(&ride)),
        )
        .await?;

        creator.rides_created.push(ride.id);
        save_user(&mut tx, &creator).await?;

        tx.commit().await?;

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn update_ride(&self, id: Uuid, patch: RidePatch) -> Result<Ride, Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let mut ride = fetch_ride_for_update(&mut tx, &id).await?;

        patch.apply(&mut ride);
        ride.validate()?;

        save_ride(&mut tx, &ride).await?;

        tx.commit().await?;

        Ok(ride)
    }

    #[tracing::instrument(skip(self))]
    async fn delete_ride(&self, id: Uuid, creator: Uuid) -> Result<(), Error> {
        let mut conn = self.pool.acquire().await?;
        let mut tx = conn.begin().await?;

        let ride = fetch_ride_for_update(&mut tx, &id).await?;

        if ride.creator != creator {
            return Err(bad_request_error("creator does not match ride"));
        }

        // the ride removal and the creator's back-reference commit together
        let mut user = fetch_user_for_update(&mut tx, &ride.creator).await?;
        user.rides_created.retain(|ride_id| *ride_id != id);

        tx.execute(sqlx::query("DELETE FROM rides WHERE id = $1").bind(&id))
            .await?;

        save_user(&mut tx, &user).await?;

        tx.commit().await?;

        Ok(())
    }
}

/// Search terms are matched as literal substrings, so LIKE metacharacters
/// in user input must not act as wildcards.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
