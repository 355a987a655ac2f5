use axum::extract::{Extension, Json, Path};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{NewUser, User};
use crate::error::Error;

pub async fn find(
    Extension(api): Extension<DynAPI>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, Error> {
    let user = api.find_user(id).await?;

    Ok(user.into())
}

pub async fn create(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), Error> {
    let user = api.create_user(params).await?;

    Ok((StatusCode::CREATED, user.into()))
}
