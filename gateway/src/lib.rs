pub mod cache_policy;
pub mod canonical;
pub mod config;
pub mod errors;
pub mod listing;
pub mod metrics_defs;
pub mod params;
pub mod response;
pub mod routes;
pub mod selector;
pub mod service;
pub mod signer;

#[cfg(test)]
mod testutils;

use config::Config;
use errors::{GatewayError, Result};
use service::{Gateway, GatewayService};
use shared::admin_service::AdminService;
use shared::http::run_http_service;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Runs the admin and gateway listeners until either fails.
///
/// The admin listener comes up first and reports not ready until the catalog
/// has been loaded and the gateway listener is about to accept connections.
pub async fn run(config: Config) -> Result<()> {
    config.validate()?;
    shared::metrics_defs::describe_all(metrics_defs::ALL_METRICS);

    let connection_timeouts = config.timeouts.connection();
    let ready = Arc::new(AtomicBool::new(false));

    let admin_service: AdminService<_, GatewayError> = AdminService::new({
        let ready = ready.clone();
        move || ready.load(Ordering::Relaxed)
    });
    let admin_task = run_http_service(
        &config.admin_listener.host,
        config.admin_listener.port,
        connection_timeouts,
        admin_service,
    );

    let gateway_task = async {
        let catalog_config = config.catalog.clone();
        let provider = tokio::task::spawn_blocking(move || catalog::open(&catalog_config))
            .await
            .map_err(|e| GatewayError::InternalError(format!("Catalog loader failed: {e}")))??;

        let gateway = Gateway::new(&config, provider)?;
        ready.store(true, Ordering::Relaxed);
        tracing::info!("Catalog loaded");

        run_http_service(
            &config.listener.host,
            config.listener.port,
            connection_timeouts,
            GatewayService::new(gateway),
        )
        .await
    };

    tokio::try_join!(admin_task, gateway_task)?;
    Ok(())
}
