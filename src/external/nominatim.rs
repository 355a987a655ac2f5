use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{upstream_error, Error};

/// Queries shorter than this resolve to an empty candidate list without a
/// network call, so keystroke-by-keystroke searches do not flood the
/// geocoding service.
pub const MIN_QUERY_LEN: usize = 2;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub place_id: i64,
    pub display_name: String,
    pub lat: f64,
    pub lon: f64,
}

#[async_trait]
pub trait PlaceLookup: Send + Sync {
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceCandidate>, Error>;
}

pub type DynPlaceLookup = Arc<dyn PlaceLookup>;

/// Nominatim-backed place search.
#[derive(Clone, Debug)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

// Nominatim serializes coordinates as strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    place_id: i64,
    display_name: String,
    lat: String,
    lon: String,
}

impl NominatimClient {
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
impl PlaceLookup for NominatimClient {
    #[tracing::instrument(skip(self))]
    async fn search_places(&self, query: &str) -> Result<Vec<PlaceCandidate>, Error> {
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);

        let res = self
            .client
            .get(url)
            .query(&[("q", query)])
            .query(&[("format", "json"), ("addressdetails", "1")])
            .send()
            .await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let places: Vec<NominatimPlace> = res.json().await?;

        places
            .into_iter()
            .map(|place| {
                let lat = place.lat.parse().map_err(|_| upstream_error())?;
                let lon = place.lon.parse().map_err(|_| upstream_error())?;

                Ok(PlaceCandidate {
                    place_id: place.place_id,
                    display_name: place.display_name,
                    lat,
                    lon,
                })
            })
            .collect()
    }
}
