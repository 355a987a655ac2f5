pub mod places;
pub mod rides;
pub mod routes;
pub mod users;
