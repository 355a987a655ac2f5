use std::env;
use std::net::IpAddr;

use crate::error::{config_error, Error};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const DEFAULT_OSRM_BASE_URL: &str = "http://router.project-osrm.org";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub max_connections: u32,
    pub nominatim_base_url: String,
    pub osrm_base_url: String,
}

impl Config {
    /// Reads configuration from the environment, loading a local `.env`
    /// file first if one is present. `DATABASE_URL` is required, everything
    /// else has a default.
    pub fn from_env() -> Result<Self, Error> {
        dotenv::dotenv().ok();

        let database_url = env::var("DATABASE_URL")?;

        let host = env::var("HOST")
            .unwrap_or_else(|_| DEFAULT_HOST.into())
            .parse()
            .map_err(|_| config_error("HOST must be a valid IP address"))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| config_error("PORT must be a valid port number"))?,
            Err(_) => DEFAULT_PORT,
        };

        let max_connections = match env::var("MAX_DB_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| config_error("MAX_DB_CONNECTIONS must be a positive integer"))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let nominatim_base_url =
            env::var("NOMINATIM_BASE_URL").unwrap_or_else(|_| DEFAULT_NOMINATIM_BASE_URL.into());
        let osrm_base_url =
            env::var("OSRM_BASE_URL").unwrap_or_else(|_| DEFAULT_OSRM_BASE_URL.into());

        Ok(Self {
            database_url,
            host,
            port,
            max_connections,
            nominatim_base_url,
            osrm_base_url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn default_host_is_loopback() {
        let host: IpAddr = DEFAULT_HOST.parse().unwrap();
        assert_eq!(host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    }
}
