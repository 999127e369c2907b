use std::net::SocketAddr;

use anyhow::Context;

const DEFAULT_DATABASE_URL: &str = "sqlite://employeedir.db?mode=rwc";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5001";
const DEFAULT_JWT_SECRET: &str = "chamber_of_secrets";
const DEFAULT_MAX_CONNECTIONS: u32 = 16;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub max_connections: u32,
}

impl Config {
    /// Reads the process environment, after loading `.env` if there is one.
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv::dotenv().ok();

        let database_url = dotenv::var("DATABASE_URL")
            .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_owned());

        let bind_addr = dotenv::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let jwt_secret = match dotenv::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                tracing::warn!("JWT_SECRET not set, signing tokens with the built-in default");
                DEFAULT_JWT_SECRET.to_owned()
            }
        };

        let max_connections = match dotenv::var("DB_MAX_CONNECTIONS") {
            Ok(n) => n.parse().context("DB_MAX_CONNECTIONS is not a number")?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config {
            database_url,
            bind_addr,
            jwt_secret,
            max_connections,
        })
    }
}
