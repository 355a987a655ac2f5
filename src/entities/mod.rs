mod location;
mod ride;
mod user;

pub use location::Coordinates;
pub use ride::{
    NewRide, Ride, RideEndpoint, RideListing, RidePatch, RideQuery, RideWithCreator, SearchFilters,
};
pub use user::{CreatorProfile, CreatorSummary, NewUser, User};
