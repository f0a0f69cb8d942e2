//! Storefront JSON API Server

use std::process;

use salvo::{
    affix_state::inject, oapi::OpenApi, oapi::swagger_ui::SwaggerUi, prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use storefront_app::context::AppContext;

use crate::{config::ServerConfig, observability::Observability, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod affiliates;
mod amounts;
mod cart;
mod config;
mod coupons;
mod extensions;
mod healthcheck;
mod observability;
mod orders;
mod products;
mod router;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Storefront JSON API Server entry point
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        #[expect(clippy::exit, reason = "configuration errors are fatal at startup")]
        process::exit(1);
    });

    let observability = match Observability::init(&config) {
        Ok(observability) => observability,
        Err(init_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "logging failed to initialise, must use eprintln"
            )]
            {
                eprintln!("Observability error: {init_error}");
            }

            #[expect(clippy::exit, reason = "observability errors are fatal at startup")]
            process::exit(1);
        }
    };

    let pricing = match config.pricing.pricing_config() {
        Ok(pricing) => pricing,
        Err(pricing_error) => {
            error!("invalid pricing configuration: {pricing_error}");

            #[expect(clippy::exit, reason = "configuration errors are fatal at startup")]
            process::exit(1);
        }
    };

    let currency = pricing.currency;

    let addr = config.socket_addr();

    info!(
        currency = currency.iso_alpha_code,
        "Starting server on {addr}"
    );

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let app = match AppContext::from_database_url(&config.database.database_url, pricing).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            #[expect(clippy::exit, reason = "startup cannot continue without a database")]
            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app, currency)))
        .push(router::app_router(observability.metrics_enabled()));

    let doc = OpenApi::new("Storefront API", env!("CARGO_PKG_VERSION")).merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
