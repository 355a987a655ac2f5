use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{CreatorProfile, CreatorSummary, User};
use crate::error::{bad_request_error, Error};

/// One side of a ride: the place text the user picked plus its coordinates.
/// Coordinates stay unset until the place is resolved through geocoding and
/// are treated as an immutable snapshot of the chosen place afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RideEndpoint {
    pub place: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub id: Uuid,
    pub origin: RideEndpoint,
    pub destination: RideEndpoint,
    pub available_seats: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub price: i64,
    pub creator: Uuid,
}

impl Ride {
    pub fn new(details: NewRide) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin: details.origin,
            destination: details.destination,
            available_seats: details.available_seats,
            start_time: details.start_time,
            end_time: details.end_time,
            price: details.price,
            creator: details.creator,
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.available_seats < 1 {
            return Err(bad_request_error("availableSeats must be at least 1"));
        }

        if self.price < 0 {
            return Err(bad_request_error("price must not be negative"));
        }

        if self.end_time <= self.start_time {
            return Err(bad_request_error("endTime must be after startTime"));
        }

        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRide {
    pub origin: RideEndpoint,
    pub destination: RideEndpoint,
    pub available_seats: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub price: i64,
    pub creator: Uuid,
}

/// Partial update; absent fields keep their stored value. The creator is
/// deliberately not patchable as moving a ride between creators would break
/// the `ridesCreated` back-reference.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RidePatch {
    pub origin: Option<RideEndpoint>,
    pub destination: Option<RideEndpoint>,
    pub available_seats: Option<i32>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub price: Option<i64>,
}

impl RidePatch {
    pub fn apply(self, ride: &mut Ride) {
        if let Some(origin) = self.origin {
            ride.origin = origin;
        }
        if let Some(destination) = self.destination {
            ride.destination = destination;
        }
        if let Some(available_seats) = self.available_seats {
            ride.available_seats = available_seats;
        }
        if let Some(start_time) = self.start_time {
            ride.start_time = start_time;
        }
        if let Some(end_time) = self.end_time {
            ride.end_time = end_time;
        }
        if let Some(price) = self.price {
            ride.price = price;
        }
    }
}

/// Raw search parameters as they arrive on the query string. `date` is
/// accepted for interface compatibility but never applied as a filter.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RideQuery {
    pub from: Option<String>,
    pub to: Option<String>,
    pub seat: Option<i32>,
    pub date: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchFilters {
    pub from: String,
    pub to: String,
    pub seat: i32,
}

impl RideQuery {
    /// Validates that all required parameters are present, before any
    /// database work happens.
    pub fn validate(self) -> Result<SearchFilters, Error> {
        match (self.from, self.to, self.seat) {
            (Some(from), Some(to), Some(seat)) if !from.is_empty() && !to.is_empty() => {
                Ok(SearchFilters { from, to, seat })
            }
            _ => Err(bad_request_error("please provide all the details")),
        }
    }
}

/// A ride with its creator's full public profile joined in, as returned by
/// the single-ride lookup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideWithCreator {
    pub id: Uuid,
    pub origin: RideEndpoint,
    pub destination: RideEndpoint,
    pub available_seats: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub price: i64,
    pub creator: CreatorProfile,
}

impl RideWithCreator {
    pub fn new(ride: Ride, creator: &User) -> Self {
        Self {
            id: ride.id,
            origin: ride.origin,
            destination: ride.destination,
            available_seats: ride.available_seats,
            start_time: ride.start_time,
            end_time: ride.end_time,
            price: ride.price,
            creator: creator.profile_view(),
        }
    }
}

/// A ride with only the creator's name and stars, as returned by list and
/// search.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideListing {
    pub id: Uuid,
    pub origin: RideEndpoint,
    pub destination: RideEndpoint,
    pub available_seats: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub price: i64,
    pub creator: CreatorSummary,
}

impl RideListing {
    pub fn new(ride: Ride, creator: &User) -> Self {
        Self {
            id: ride.id,
            origin: ride.origin,
            destination: ride.destination,
            available_seats: ride.available_seats,
            start_time: ride.start_time,
            end_time: ride.end_time,
            price: ride.price,
            creator: creator.summary_view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_details() -> NewRide {
        NewRide {
            origin: RideEndpoint {
                place: "Pune Station".into(),
                lat: Some(18.5285),
                lng: Some(73.8743),
            },
            destination: RideEndpoint {
                place: "Mumbai Central".into(),
                lat: Some(18.9696),
                lng: Some(72.8195),
            },
            available_seats: 3,
            start_time: Utc::now(),
            end_time: Utc::now() + Duration::hours(3),
            price: 250,
            creator: Uuid::new_v4(),
        }
    }

    #[test]
    fn new_ride_keeps_submitted_fields() {
        let details = sample_details();
        let ride = Ride::new(details.clone());

        assert_eq!(ride.origin, details.origin);
        assert_eq!(ride.destination, details.destination);
        assert_eq!(ride.available_seats, details.available_seats);
        assert_eq!(ride.price, details.price);
        assert_eq!(ride.creator, details.creator);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let ride = Ride::new(sample_details());
        let value = serde_json::to_value(&ride).unwrap();

        assert!(value.get("availableSeats").is_some());
        assert!(value.get("startTime").is_some());
        assert!(value.get("endTime").is_some());
        assert!(value["origin"].get("place").is_some());
        assert!(value["origin"].get("lat").is_some());
        assert!(value["origin"].get("lng").is_some());
    }

    #[test]
    fn validate_rejects_non_positive_seats() {
        let mut details = sample_details();
        details.available_seats = 0;
        assert!(Ride::new(details).validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_price() {
        let mut details = sample_details();
        details.price = -1;
        assert!(Ride::new(details).validate().is_err());
    }

    #[test]
    fn validate_rejects_end_before_start() {
        let mut details = sample_details();
        details.end_time = details.start_time - Duration::minutes(5);
        assert!(Ride::new(details).validate().is_err());
    }

    #[test]
    fn validate_accepts_well_formed_ride() {
        assert!(Ride::new(sample_details()).validate().is_ok());
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut ride = Ride::new(sample_details());
        let before = ride.clone();

        let patch = RidePatch {
            available_seats: Some(1),
            price: Some(300),
            ..Default::default()
        };
        patch.apply(&mut ride);

        assert_eq!(ride.available_seats, 1);
        assert_eq!(ride.price, 300);
        assert_eq!(ride.origin, before.origin);
        assert_eq!(ride.start_time, before.start_time);
        assert_eq!(ride.creator, before.creator);
    }

    #[test]
    fn query_validation_requires_from_to_and_seat() {
        let missing_seat = RideQuery {
            from: Some("Pune".into()),
            to: Some("Mumbai".into()),
            ..Default::default()
        };
        assert!(missing_seat.validate().is_err());

        let missing_from = RideQuery {
            to: Some("Mumbai".into()),
            seat: Some(2),
            ..Default::default()
        };
        assert!(missing_from.validate().is_err());

        let empty_to = RideQuery {
            from: Some("Pune".into()),
            to: Some("".into()),
            seat: Some(2),
            ..Default::default()
        };
        assert!(empty_to.validate().is_err());
    }

    #[test]
    fn query_validation_ignores_date() {
        let query = RideQuery {
            from: Some("Pune".into()),
            to: Some("Mumbai".into()),
            seat: Some(2),
            date: Some("2026-09-01".into()),
        };

        let filters = query.validate().unwrap();
        assert_eq!(
            filters,
            SearchFilters {
                from: "Pune".into(),
                to: "Mumbai".into(),
                seat: 2,
            }
        );
    }
}
