use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::entities::{
    NewRide, NewUser, Ride, RideListing, RidePatch, RideQuery, RideWithCreator, User,
};
use crate::error::Error;

#[async_trait]
pub trait RideAPI {
    async fn find_ride(&self, id: Uuid) -> Result<RideWithCreator, Error>;
    async fn list_rides(&self) -> Result<Vec<RideListing>, Error>;
    async fn search_rides(&self, query: RideQuery) -> Result<Vec<RideListing>, Error>;
    async fn create_ride(&self, details: NewRide) -> Result<Ride, Error>;
    async fn update_ride(&self, id: Uuid, patch: RidePatch) -> Result<Ride, Error>;
    async fn delete_ride(&self, id: Uuid, creator: Uuid) -> Result<(), Error>;
}

#[async_trait]
pub trait UserAPI {
    async fn find_user(&self, id: Uuid) -> Result<User, Error>;
    async fn create_user(&self, details: NewUser) -> Result<User, Error>;
}

pub trait API: RideAPI + UserAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
