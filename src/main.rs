//! application entry point

use crate::server::model::config::ServerConfig;
use anyhow::Context;
use derive_more::Display;
use log::{info, warn};
use std::env;
use std::net::SocketAddrV4;
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod server;

const DOTENV_FILE: &str = ".env.dev";
const HOST_PARSING_FAILED_MSG: &str = "failed to parse HOST, aborting";
const DEFAULT_HOST_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_ORDERS_FILE: &str = "orders.json";
const DEFAULT_INDEX_FILE: &str = "index.html";

#[actix_web::main()]
async fn main() -> anyhow::Result<()> {
    // bootstrap
    // a. env
    let env = env::var("APP_ENV")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(Env::Dev); // default dev env if absent

    let dotenv = match env {
        Env::Prod | Env::Stg => Ok(()), // load in CI
        Env::Dev => dotenvy::from_path(Path::new(DOTENV_FILE)),
    };

    // b. logging
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(env.default_log_filter()));
    if let Err(e) = dotenv {
        warn!("failed to load {}, using process envs only, {}", DOTENV_FILE, e);
    }

    // c. run app
    let addr = SocketAddrV4::from_str(
        env::var("HOST")
            .unwrap_or(DEFAULT_HOST_ADDR.to_string())
            .as_str(),
    )
    .context(HOST_PARSING_FAILED_MSG)?;
    let config = ServerConfig::new(
        addr,
        PathBuf::from(env::var("ORDERS_FILE").unwrap_or(DEFAULT_ORDERS_FILE.to_string())),
        PathBuf::from(env::var("INDEX_FILE").unwrap_or(DEFAULT_INDEX_FILE.to_string())),
    );

    info!("App is starting in env={}", env);

    server::run(config).await
}

#[derive(Debug, Display, PartialEq)]
#[non_exhaustive]
enum Env {
    Dev,
    Stg,
    Prod,
}

impl Env {
    /// dev runs in debug mode
    fn default_log_filter(&self) -> &'static str {
        match self {
            Env::Dev => "debug",
            Env::Stg | Env::Prod => "info",
        }
    }
}

impl FromStr for Env {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dev" => Ok(Self::Dev),
            "stg" => Ok(Self::Stg),
            "prod" => Ok(Self::Prod),
            s => Err(format!("Invalid Env: {s}")),
        }
    }
}
