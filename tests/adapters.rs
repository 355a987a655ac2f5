//! Outbound adapter tests against a mock HTTP server.

use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ridepool::entities::Coordinates;
use ridepool::external::nominatim::{NominatimClient, PlaceLookup};
use ridepool::external::osrm::{OsrmClient, RoutePlanner};

const fn sample_places_json() -> &'static str {
    r#"[
        {
            "place_id": 12345,
            "display_name": "Pune Station, Pune, Maharashtra, India",
            "lat": "18.5285",
            "lon": "73.8743"
        },
        {
            "place_id": 67890,
            "display_name": "Pune Airport, Pune, Maharashtra, India",
            "lat": "18.5793",
            "lon": "73.9089"
        }
    ]"#
}

const fn sample_route_json() -> &'static str {
    r#"{
        "code": "Ok",
        "routes": [{
            "geometry": {
                "coordinates": [[73.8743, 18.5285], [73.5000, 18.7000], [72.8195, 18.9696]]
            },
            "distance": 148227.3
        }]
    }"#
}

#[tokio::test]
async fn place_search_returns_parsed_candidates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "pune"))
        .and(query_param("format", "json"))
        .and(query_param("addressdetails", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_places_json()))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&server.uri()).unwrap();
    let candidates = client.search_places("pune").await.unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(
        candidates[0].display_name,
        "Pune Station, Pune, Maharashtra, India"
    );
    assert_eq!(candidates[0].lat, 18.5285);
    assert_eq!(candidates[0].lon, 73.8743);
    assert_eq!(candidates[1].place_id, 67890);
}

#[tokio::test]
async fn place_search_short_circuits_short_queries() {
    let server = MockServer::start().await;

    // any request reaching the server fails the test on drop
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(0)
        .mount(&server)
        .await;

    let client = NominatimClient::new(&server.uri()).unwrap();

    assert!(client.search_places("").await.unwrap().is_empty());
    assert!(client.search_places("p").await.unwrap().is_empty());
}

#[tokio::test]
async fn place_search_surfaces_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = NominatimClient::new(&server.uri()).unwrap();

    assert!(client.search_places("pune").await.is_err());
}

#[tokio::test]
async fn route_plan_flips_coordinates_and_converts_distance() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.*"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .mount(&server)
        .await;

    let client = OsrmClient::new(&server.uri()).unwrap();
    let plan = client
        .plan_route(
            Coordinates {
                latitude: 18.5285,
                longitude: 73.8743,
            },
            Coordinates {
                latitude: 18.9696,
                longitude: 72.8195,
            },
        )
        .await
        .unwrap();

    assert_eq!(plan.geometry.len(), 3);
    assert_eq!(plan.geometry[0].latitude, 18.5285);
    assert_eq!(plan.geometry[0].longitude, 73.8743);
    assert_eq!(plan.distance_km, 148.23);
}

#[tokio::test]
async fn route_plan_reports_unroutable_pairs() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.*"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{ "code": "NoRoute", "routes": [] }"#),
        )
        .mount(&server)
        .await;

    let client = OsrmClient::new(&server.uri()).unwrap();
    let result = client
        .plan_route(
            Coordinates {
                latitude: 18.5285,
                longitude: 73.8743,
            },
            Coordinates {
                latitude: -47.0,
                longitude: -134.0,
            },
        )
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn route_plan_surfaces_server_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/route/v1/driving/.*"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = OsrmClient::new(&server.uri()).unwrap();
    let result = client
        .plan_route(
            Coordinates {
                latitude: 18.5285,
                longitude: 73.8743,
            },
            Coordinates {
                latitude: 18.9696,
                longitude: 72.8195,
            },
        )
        .await;

    assert!(result.is_err());
}
