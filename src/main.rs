use std::net::SocketAddr;
use std::sync::Arc;

use ridepool::config::Config;
use ridepool::db;
use ridepool::engine::Engine;
use ridepool::external::nominatim::NominatimClient;
use ridepool::external::osrm::OsrmClient;
use ridepool::server::serve;

#[tokio::main]
async fn main() {
    let config = Config::from_env().unwrap();

    let pool = db::connect(&config.database_url, config.max_connections)
        .await
        .unwrap();

    let engine = Engine::new(pool).await.unwrap();

    let place_lookup = Arc::new(NominatimClient::new(&config.nominatim_base_url).unwrap());
    let route_planner = Arc::new(OsrmClient::new(&config.osrm_base_url).unwrap());

    let addr = SocketAddr::from((config.host, config.port));

    serve(engine, place_lookup, route_planner, addr).await;
}
