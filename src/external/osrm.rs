use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::entities::Coordinates;
use crate::error::{upstream_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePlan {
    /// Polyline as lat/lng pairs, in travel order.
    pub geometry: Vec<Coordinates>,
    /// Driving distance in kilometers, rounded to two decimals.
    pub distance_km: f64,
}

#[async_trait]
pub trait RoutePlanner: Send + Sync {
    async fn plan_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RoutePlan, Error>;
}

pub type DynRoutePlanner = Arc<dyn RoutePlanner>;

/// OSRM-backed route planning.
#[derive(Clone, Debug)]
pub struct OsrmClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: OsrmGeometry,
    distance: f64,
}

// GeoJSON, so coordinates come as [lon, lat]
#[derive(Debug, Deserialize)]
struct OsrmGeometry {
    coordinates: Vec<[f64; 2]>,
}

fn round_to_km(meters: f64) -> f64 {
    (meters / 10.0).round() / 100.0
}

impl OsrmClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent("ridepool/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }
}

#[async_trait]
impl RoutePlanner for OsrmClient {
    #[tracing::instrument(skip(self))]
    async fn plan_route(
        &self,
        origin: Coordinates,
        destination: Coordinates,
    ) -> Result<RoutePlan, Error> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url,
            origin.longitude,
            origin.latitude,
            destination.longitude,
            destination.latitude,
        );

        let res = self
            .client
            .get(url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let data: OsrmResponse = res.json().await?;

        if data.code != "Ok" {
            return Err(upstream_error());
        }

        let route = data.routes.into_iter().next().ok_or_else(upstream_error)?;

        let geometry = route
            .geometry
            .coordinates
            .into_iter()
            .map(|[longitude, latitude]| Coordinates {
                latitude,
                longitude,
            })
            .collect();

        Ok(RoutePlan {
            geometry,
            distance_km: round_to_km(route.distance),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_rounds_to_two_decimals() {
        assert_eq!(round_to_km(15543.0), 15.54);
        assert_eq!(round_to_km(15546.0), 15.55);
        assert_eq!(round_to_km(0.0), 0.0);
    }

    #[test]
    fn parses_osrm_payload_and_flips_coordinates() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": { "coordinates": [[73.8743, 18.5285], [72.8195, 18.9696]] },
                "distance": 148227.3
            }]
        }"#;

        let data: OsrmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(data.code, "Ok");
        assert_eq!(data.routes[0].geometry.coordinates[0], [73.8743, 18.5285]);
    }

    #[test]
    fn no_route_payload_has_empty_routes() {
        let json = r#"{ "code": "NoRoute" }"#;
        let data: OsrmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(data.code, "NoRoute");
        assert!(data.routes.is_empty());
    }
}
