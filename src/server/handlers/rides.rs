use axum::extract::{Extension, Json, Path, Query};
use axum::http::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{NewRide, Ride, RideListing, RidePatch, RideQuery, RideWithCreator};
use crate::error::Error;

#[derive(Deserialize)]
pub struct DeleteParams {
    creator: Uuid,
}

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<RideWithCreator>, Error> {
    let ride = api.find_ride(id).await?;

    Ok(ride.into())
}

pub async fn list(Extension(api): Extension<DynAPI>) -> Result<Json<Vec<RideListing>>, Error> {
    let rides = api.list_rides().await?;

    Ok(rides.into())
}

pub async fn search(
    Extension(api): Extension<DynAPI>,
    Query(query): Query<RideQuery>,
) -> Result<Json<Value>, Error> {
    let rides = api.search_rides(query).await?;

    Ok(json!({ "success": true, "rides": rides }).into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<NewRide>,
) -> Result<(StatusCode, Json<Ride>), Error> {
    let ride = api.create_ride(params).await?;

    Ok((StatusCode::CREATED, ride.into()))
}

pub async fn update(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(patch): Json<RidePatch>,
) -> Result<Json<Value>, Error> {
    let ride = api.update_ride(id, patch).await?;

    Ok(json!({ "success": true, "ride": ride }).into())
}

pub async fn remove(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
    Json(params): Json<DeleteParams>,
) -> Result<&'static str, Error> {
    api.delete_ride(id, params.creator).await?;

    Ok("ride has been deleted")
}
