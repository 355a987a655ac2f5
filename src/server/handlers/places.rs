use axum::extract::{Extension, Json, Query};
use serde::Deserialize;

use crate::error::Error;
use crate::external::nominatim::{DynPlaceLookup, PlaceCandidate};

#[derive(Deserialize)]
pub struct SearchParams {
    q: String,
}

pub async fn search(
    Extension(lookup): Extension<DynPlaceLookup>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<PlaceCandidate>>, Error> {
    let candidates = lookup.search_places(&params.q).await?;

    Ok(candidates.into())
}
