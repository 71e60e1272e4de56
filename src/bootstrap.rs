//! Process start-up shared by the `libris-app` and `libris` binaries.

use anyhow::Context;
use libris_db::DbPool;
use libris_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use crate::modules;

/// Open the configured database and bring the schema up to date.
pub async fn open_database(settings: &Settings, registry: &ModuleRegistry) -> anyhow::Result<DbPool> {
    let db = libris_db::connect(&settings.database.url, settings.database.max_connections).await?;
    registry
        .apply_schema(&db)
        .await
        .context("failed to apply schema")?;
    Ok(db)
}

/// Run the HTTP service until a shutdown signal arrives.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "libris bootstrap starting"
    );

    let registry = modules::registry();
    let db = open_database(&settings, &registry).await?;
    let ctx = InitCtx {
        settings: &settings,
        db: &db,
    };

    registry.init_modules(&ctx).await?;
    tracing::info!("libris bootstrap complete");

    let served = libris_http::start_server(&registry, &ctx).await;

    registry.stop_modules().await?;
    db.close().await;
    served
}
