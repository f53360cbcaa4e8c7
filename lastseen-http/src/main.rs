use std::sync::Arc;

use anyhow::Context;
use lastseen_core::{
    activity::ActivityStorage,
    activity_storage_impl::{FileStorage, MongoStorage},
    global::{self as core_global, StorageBackend},
};
use lastseen_http::{global, routes, AppContext};
use lastseen_utils::{graceful_util, tracing_util};
use tokio::sync::Notify;

const SERVICE_NAME: &str = "lastseen-http";

#[tokio::main]
async fn main() {
    tracing_util::init_tracing(SERVICE_NAME);

    if let Err(err) = run().await {
        tracing::error!("{} failed: {:#}", SERVICE_NAME, err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), anyhow::Error> {
    let cfg = global::load_config().context("failed loading http config")?;
    let core_cfg = core_global::load_config().context("failed loading core config")?;

    tracing::info!("storage backend: {}", core_cfg.storage_backend);

    match core_cfg.storage_backend {
        StorageBackend::File => {
            let storage = FileStorage::open(&core_cfg.data_file).with_context(|| {
                format!("failed opening data file {:?}", core_cfg.data_file)
            })?;
            serve(cfg.http_port, storage).await
        }
        StorageBackend::Mongo => {
            let uri = core_cfg.mongo_uri()?;
            let storage = MongoStorage::open(
                uri,
                &core_cfg.mongo_database,
                &core_cfg.mongo_collection,
            )
            .await
            .context("failed connecting to mongo")?;
            serve(cfg.http_port, storage).await
        }
    }
}

/// serve until a shutdown signal, then close the storage.
async fn serve<AS>(port: u16, storage: AS) -> Result<(), anyhow::Error>
where
    AS: ActivityStorage + Clone + Send + Sync + 'static,
{
    let routes = routes::register_routes(AppContext::new(storage.clone()));

    let addr = ("0.0.0.0", port);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("httpserver: failed listening to tcp")?;

    tracing::info!(
        "server is listening on http://{}",
        listener
            .local_addr()
            .context("httpserver: invalid address")?
    );

    let notify_shutdown = Arc::new(Notify::new());
    graceful_util::graceful_shutdown(notify_shutdown.clone());

    axum::serve(listener, routes)
        .with_graceful_shutdown(graceful_util::wait_for_shutdown(notify_shutdown))
        .await
        .context("httpserver failed")?;

    storage.close().await?;
    tracing::info!("{} stopped", SERVICE_NAME);

    Ok(())
}
