use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::api::DynAPI;
use crate::entities::{Coordinates, NewRide, Ride, RideEndpoint};
use crate::error::{bad_request_error, Error};
use crate::external::nominatim::{DynPlaceLookup, PlaceCandidate};
use crate::external::osrm::{DynRoutePlanner, RoutePlan};

/// Search-as-you-type coordinator. Every search carries a monotonically
/// increasing sequence number and a response is applied only when nothing
/// newer has been applied yet, so a slow response to an old keystroke can
/// never clobber the suggestions for a newer one.
pub struct PlaceSearchSession {
    lookup: DynPlaceLookup,
    next_seq: AtomicU64,
    applied: Mutex<Applied>,
}

#[derive(Default)]
struct Applied {
    seq: u64,
    candidates: Vec<PlaceCandidate>,
}

impl PlaceSearchSession {
    pub fn new(lookup: DynPlaceLookup) -> Self {
        Self {
            lookup,
            next_seq: AtomicU64::new(0),
            applied: Mutex::new(Applied::default()),
        }
    }

    /// Runs a search and returns the suggestions that are current once its
    /// response has been considered, which are not necessarily the response
    /// itself if a newer search already landed.
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, Error> {
        let seq = self.begin();
        let candidates = self.lookup.search_places(query).await?;

        Ok(self.apply(seq, candidates).await)
    }

    pub async fn latest(&self) -> Vec<PlaceCandidate> {
        self.applied.lock().await.candidates.clone()
    }

    fn begin(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn apply(&self, seq: u64, candidates: Vec<PlaceCandidate>) -> Vec<PlaceCandidate> {
        let mut applied = self.applied.lock().await;

        if seq > applied.seq {
            applied.seq = seq;
            applied.candidates = candidates;
        }

        applied.candidates.clone()
    }
}

#[derive(Clone, Debug)]
pub struct PublishForm {
    pub available_seats: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub price: i64,
    pub creator: Uuid,
}

/// Drives a single publish: resolve the two endpoints to coordinate
/// snapshots, keep the route preview current, then submit the assembled
/// ride through the ride API.
pub struct PublishFlow {
    api: DynAPI,
    planner: DynRoutePlanner,
    origin: Option<RideEndpoint>,
    destination: Option<RideEndpoint>,
    route: Option<RoutePlan>,
}

impl PublishFlow {
    pub fn new(api: DynAPI, planner: DynRoutePlanner) -> Self {
        Self {
            api,
            planner,
            origin: None,
            destination: None,
            route: None,
        }
    }

    pub async fn select_origin(&mut self, candidate: &PlaceCandidate) -> Result<(), Error> {
        self.origin = Some(endpoint_from(candidate));
        self.refresh_route().await
    }

    pub async fn select_destination(&mut self, candidate: &PlaceCandidate) -> Result<(), Error> {
        self.destination = Some(endpoint_from(candidate));
        self.refresh_route().await
    }

    pub fn route(&self) -> Option<&RoutePlan> {
        self.route.as_ref()
    }

    pub fn distance_km(&self) -> Option<f64> {
        self.route.as_ref().map(|route| route.distance_km)
    }

    pub async fn submit(&self, form: PublishForm) -> Result<Ride, Error> {
        let origin = self
            .origin
            .clone()
            .ok_or_else(|| bad_request_error("origin is not set"))?;
        let destination = self
            .destination
            .clone()
            .ok_or_else(|| bad_request_error("destination is not set"))?;

        self.api
            .create_ride(NewRide {
                origin,
                destination,
                available_seats: form.available_seats,
                start_time: form.start_time,
                end_time: form.end_time,
                price: form.price,
                creator: form.creator,
            })
            .await
    }

    /// Recomputes the route once both endpoints are resolved. On planner
    /// failure the previous route state stays in place.
    async fn refresh_route(&mut self) -> Result<(), Error> {
        let (origin, destination) = match (coordinates_of(&self.origin), coordinates_of(&self.destination)) {
            (Some(origin), Some(destination)) => (origin, destination),
            _ => return Ok(()),
        };

        let plan = self.planner.plan_route(origin, destination).await?;
        self.route = Some(plan);

        Ok(())
    }
}

fn endpoint_from(candidate: &PlaceCandidate) -> RideEndpoint {
    RideEndpoint {
        place: candidate.display_name.clone(),
        lat: Some(candidate.lat),
        lng: Some(candidate.lon),
    }
}

fn coordinates_of(endpoint: &Option<RideEndpoint>) -> Option<Coordinates> {
    let endpoint = endpoint.as_ref()?;

    Some(Coordinates {
        latitude: endpoint.lat?,
        longitude: endpoint.lng?,
    })
}
