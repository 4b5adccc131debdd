//! main file for the server

pub mod model;
mod controller;
mod routes;
mod state;
mod storage;

use crate::server::model::config::ServerConfig;
use crate::server::state::AppState;
use crate::server::storage::file::OrderFile;
use crate::server::storage::OrderBook;
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;

/// Run the server
pub(crate) async fn run(
    ServerConfig {
        addr,
        orders_path,
        index_path,
    }: ServerConfig,
) -> anyhow::Result<()> {
    let order_book = OrderBook::new(OrderFile::new(&orders_path));
    if order_book
        .init()
        .await
        .with_context(|| format!("failed to initialize {}", orders_path.display()))?
    {
        info!("created empty orders file at {}", orders_path.display());
    }

    let state = web::Data::new(AppState::new(order_book, index_path));
    info!("listening on {}", addr);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors())
            .wrap(Logger::default())
            .configure(routes::configure)
    })
    .bind(addr)?
    .run()
    .await?;
    Ok(())
}

/// any origin may call the api
fn cors() -> Cors {
    Cors::permissive()
}
