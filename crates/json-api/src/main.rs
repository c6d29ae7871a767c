//! Pustaka JSON API Server

use std::{process, sync::Arc, time::Duration};

use salvo::{
    affix_state::inject,
    oapi::{OpenApi, swagger_ui::SwaggerUi},
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};

use pustaka_app::{
    context::AppContext,
    domain::shipping::{HttpShippingRateClient, ShippingRateConfig},
};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod catalog;
mod checkout;
mod config;
mod extensions;
mod healthcheck;
mod identity;
mod observability;
mod orders;
mod payments;
mod shutdown;
mod state;
#[cfg(test)]
mod test_helpers;

/// Pustaka JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
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

        process::exit(1);
    });

    if let Err(init_error) = observability::init(&config) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Observability error: {init_error}");
        }

        process::exit(1);
    }

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let shipping = match HttpShippingRateClient::new(ShippingRateConfig {
        base_url: config.shipping.rate_api_base_url.clone(),
        api_key: config.shipping.rate_api_key.clone(),
        timeout: Duration::from_secs(config.shipping.rate_api_timeout_seconds),
    }) {
        Ok(client) => client,
        Err(init_error) => {
            error!("failed to initialize shipping rate client: {init_error}");

            process::exit(1);
        }
    };

    let app = match AppContext::from_database_url(
        &config.database.database_url,
        Arc::new(shipping),
        config.payment.server_key.clone(),
        config.shipping.origin_id.clone(),
    )
    .await
    {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(observability::request_logging)
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(observability::metrics_handler))
        .push(
            Router::with_path("payments/notifications")
                .post(payments::handlers::notification::handler),
        )
        .push(
            Router::new()
                .hoop(identity::middleware::handler)
                .push(Router::with_path("checkout").post(checkout::handlers::create::handler))
                .push(
                    Router::with_path("orders")
                        .get(orders::handlers::index::handler)
                        .push(
                            Router::with_path("{order}")
                                .get(orders::handlers::get::handler)
                                .push(
                                    Router::with_path("receive")
                                        .post(orders::handlers::receive::handler),
                                )
                                .push(
                                    Router::with_path("ship")
                                        .hoop(identity::middleware::require_admin)
                                        .post(orders::handlers::ship::handler),
                                ),
                        ),
                )
                .push(
                    Router::with_path("books/{book}/price")
                        .get(catalog::handlers::quote::handler),
                ),
        );

    let doc = OpenApi::new("Pustaka API", "0.3.0").merge_router(&router);

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
