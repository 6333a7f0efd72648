use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3001";

/// Runtime settings of the game server.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: IpAddr,
    pub server_port: u16,
    pub environment: Environment,
    pub log_level: String,
    /// Origin allowed by CORS in production.
    pub frontend_url: String,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Unknown values fall back to `Development`.
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("production") => Self::Production,
            Some("staging") => Self::Staging,
            _ => Self::Development,
        }
    }

    /// Production listens on every interface, everything else on loopback.
    const fn default_host(self) -> IpAddr {
        match self {
            Self::Production => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            Self::Development | Self::Staging => IpAddr::V4(Ipv4Addr::LOCALHOST),
        }
    }
}

impl Config {
    /// Load configuration from `.env` and the process environment.
    ///
    /// Required: `DATABASE_URL`. Optional: `SERVER_HOST`, `SERVER_PORT` (or
    /// `PORT`, which wins), `ENVIRONMENT`, `LOG_LEVEL`, `FRONTEND_URL`.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a host/port is malformed.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let environment = Environment::parse(var("ENVIRONMENT").as_deref());

        let server_port = match var("PORT").or_else(|| var("SERVER_PORT")) {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("invalid server port {port:?}"))?,
            None => DEFAULT_PORT,
        };

        let server_host = match var("SERVER_HOST") {
            Some(host) => host
                .parse::<IpAddr>()
                .with_context(|| format!("invalid SERVER_HOST {host:?}"))?,
            None => environment.default_host(),
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            environment,
            log_level: var("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            frontend_url: var("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
        })
    }

    /// Address the HTTP listener binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }
}
