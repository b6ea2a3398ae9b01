//! Backend entry-point: loads configuration, wires adapters and serves the
//! REST API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use glasstrade::inbound::http::health::HealthState;
use glasstrade::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use glasstrade::settings::{ServerSettings, SupplierSettings, VehicleLookupSettings};
use server::{ServerConfig, VehicleLookupConfig, create_server};

/// Program name only: the external API settings come from the environment,
/// leaving the command line to [`ServerSettings`].
fn env_only_args() -> [OsString; 1] {
    [OsString::from(env!("CARGO_PKG_NAME"))]
}

async fn build_config() -> Result<ServerConfig> {
    let server = ServerSettings::load().map_err(|err| eyre!("server settings: {err}"))?;
    let supplier = SupplierSettings::load_from_iter(env_only_args())
        .map_err(|err| eyre!("supplier settings: {err}"))?;
    let vehicle = VehicleLookupSettings::load_from_iter(env_only_args())
        .map_err(|err| eyre!("vehicle lookup settings: {err}"))?;

    let vehicle_lookup = VehicleLookupConfig::new(
        vehicle.base_url()?,
        vehicle.api_key()?,
        vehicle.timeout(),
    );
    let config = ServerConfig::new(
        server.bind_addr()?,
        supplier.client_config()?,
        vehicle_lookup,
    );

    let Some(database_url) = server.database_url() else {
        return Ok(config);
    };
    if server.run_migrations {
        run_pending_migrations(database_url)
            .await
            .wrap_err("applying database migrations")?;
    }
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .wrap_err("building database pool")?;
    info!("database pool ready");
    Ok(config.with_db_pool(pool))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = build_config().await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .await
        .wrap_err("starting HTTP server")?;
    let result = server.await;
    health_state.mark_unhealthy();
    result.wrap_err("HTTP server failed")
}
