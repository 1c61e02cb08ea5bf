use std::env;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};

use tracing::warn;

use crate::inventory::PlannerConfig;
use crate::retrieval::BlockingOrder;

/// Complete application configuration, loaded from environment variables or default values.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub planner: PlannerConfig,
}

impl AppConfig {
    /// Creates a configuration from the currently available environment variables.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            planner: planner_from_env(),
        }
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    bind_ip: IpAddr,
    display_host: String,
    port: u16,
}

impl ApiConfig {
    const DEFAULT_HOST: &'static str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 8000;
    const HOST_VAR: &'static str = "STOWAGE_API_HOST";
    const PORT_VAR: &'static str = "STOWAGE_API_PORT";

    fn from_env() -> Self {
        let host_value =
            env_string(Self::HOST_VAR).unwrap_or_else(|| Self::DEFAULT_HOST.to_string());
        let (bind_ip, effective_host) = match host_value.parse::<IpAddr>() {
            Ok(ip) => (ip, host_value),
            Err(err) => {
                warn!(
                    "Could not parse {} ('{}'): {}. Using {}.",
                    Self::HOST_VAR,
                    host_value,
                    err,
                    Self::DEFAULT_HOST
                );
                (
                    IpAddr::V4(Ipv4Addr::UNSPECIFIED),
                    Self::DEFAULT_HOST.to_string(),
                )
            }
        };

        let port = env_string(Self::PORT_VAR)
            .and_then(|raw| parse_port(&raw, Self::PORT_VAR))
            .unwrap_or(Self::DEFAULT_PORT);

        Self {
            bind_ip,
            display_host: effective_host,
            port,
        }
    }

    /// Socket address to bind the server to.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_ip, self.port)
    }

    /// Visible hostname for logging and hints.
    pub fn display_host(&self) -> &str {
        &self.display_host
    }

    /// Configured port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Indicates whether binding to all interfaces.
    pub fn binds_to_all_interfaces(&self) -> bool {
        match self.bind_ip {
            IpAddr::V4(addr) => addr == Ipv4Addr::UNSPECIFIED,
            IpAddr::V6(addr) => addr == Ipv6Addr::UNSPECIFIED,
        }
    }

    /// Checks whether the hostname matches the default value.
    pub fn uses_default_host(&self) -> bool {
        self.display_host == Self::DEFAULT_HOST
    }
}

const BLOCKING_ORDER_VAR: &str = "STOWAGE_BLOCKING_ORDER";
const ENFORCE_BOUNDS_VAR: &str = "STOWAGE_ENFORCE_CONTAINER_BOUNDS";
const SYSTEM_USER_VAR: &str = "STOWAGE_SYSTEM_USER";

fn planner_from_env() -> PlannerConfig {
    let blocking_order = env_string(BLOCKING_ORDER_VAR)
        .and_then(|raw| {
            let parsed = BlockingOrder::parse(&raw);
            if parsed.is_none() {
                warn!(
                    "Could not interpret {} ('{}'). Expected nearest_first or top_first. Using default value.",
                    BLOCKING_ORDER_VAR, raw
                );
            }
            parsed
        })
        .unwrap_or_default();

    let enforce_container_bounds = env_string(ENFORCE_BOUNDS_VAR)
        .and_then(|raw| parse_bool(&raw, ENFORCE_BOUNDS_VAR))
        .unwrap_or(PlannerConfig::DEFAULT_ENFORCE_CONTAINER_BOUNDS);
    if !enforce_container_bounds {
        warn!(
            "{} is disabled: boxes reaching outside a container are only checked for size",
            ENFORCE_BOUNDS_VAR
        );
    }

    let system_user = env_string(SYSTEM_USER_VAR)
        .unwrap_or_else(|| PlannerConfig::DEFAULT_SYSTEM_USER.to_string());

    PlannerConfig::builder()
        .blocking_order(blocking_order)
        .enforce_container_bounds(enforce_container_bounds)
        .system_user(system_user)
        .build()
}

fn env_string(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(value) => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_owned())
            }
        }
        Err(env::VarError::NotPresent) => None,
        Err(err) => {
            warn!("Access to {} failed: {}. Using default value.", name, err);
            None
        }
    }
}

fn parse_port(raw: &str, var_name: &str) -> Option<u16> {
    match raw.trim().parse::<u16>() {
        Ok(0) => {
            warn!("{} must not be 0. Using default value.", var_name);
            None
        }
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                "Could not parse {} ('{}'): {}. Using default value.",
                var_name, raw, err
            );
            None
        }
    }
}

fn parse_bool(raw: &str, var_name: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        other => {
            warn!(
                "Could not interpret {} ('{}') as boolean value. Using default value.",
                var_name, other
            );
            None
        }
    }
}
