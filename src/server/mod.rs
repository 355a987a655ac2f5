mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};

use crate::server::handlers::{places, rides, routes, users};
use crate::{
    api::{DynAPI, API},
    external::nominatim::DynPlaceLookup,
    external::osrm::DynRoutePlanner,
};

pub async fn serve<T: API + Sync + Send + 'static>(
    api: T,
    place_lookup: DynPlaceLookup,
    route_planner: DynRoutePlanner,
    addr: SocketAddr,
) {
    tracing_subscriber::fmt::init();

    let api = Arc::new(api) as DynAPI;

    let app = Router::new()
        .route("/api/rides", get(rides::list).post(rides::create))
        .route("/api/rides/search", get(rides::search))
        .route(
            "/api/rides/:id",
            get(rides::find).put(rides::update).delete(rides::remove),
        )
        .route("/api/users", post(users::create))
        .route("/api/users/:id", get(users::find))
        .route("/api/places", get(places::search))
        .route("/api/routes/preview", get(routes::preview))
        .layer(Extension(api))
        .layer(Extension(place_lookup))
        .layer(Extension(route_planner));

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await
        .unwrap();
}
