use axum::extract::{Extension, Json, Query};
use serde::Deserialize;

use crate::entities::Coordinates;
use crate::error::Error;
use crate::external::osrm::{DynRoutePlanner, RoutePlan};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewParams {
    from_lat: f64,
    from_lng: f64,
    to_lat: f64,
    to_lng: f64,
}

pub async fn preview(
    Extension(planner): Extension<DynRoutePlanner>,
    Query(params): Query<PreviewParams>,
) -> Result<Json<RoutePlan>, Error> {
    let origin = Coordinates {
        latitude: params.from_lat,
        longitude: params.from_lng,
    };
    let destination = Coordinates {
        latitude: params.to_lat,
        longitude: params.to_lng,
    };

    let plan = planner.plan_route(origin, destination).await?;

    Ok(plan.into())
}
