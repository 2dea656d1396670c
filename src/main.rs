// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use collectrs::config::settings::Settings;
use collectrs::domain::services::listing_store::ListingStore;
use collectrs::infrastructure::database::connection;
use collectrs::infrastructure::repositories::listing_repo_impl::ListingRepositoryImpl;
use collectrs::presentation::middleware::auth_middleware::AuthState;
use collectrs::presentation::routes;
use collectrs::registry::JobRegistry;
use collectrs::utils::telemetry;
use collectrs::workers::generator::DemoListingGenerator;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting collectrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Connect to database
    if settings.database.url.starts_with("sqlite:") {
        // SQLite 不会自动创建父目录
        std::fs::create_dir_all("data")?;
    }
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    // Run database migrations
    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Initialize components
    let listing_repo = Arc::new(ListingRepositoryImpl::new(db.clone()));
    let store = Arc::new(ListingStore::new(listing_repo));
    let registry = Arc::new(JobRegistry::new(
        store.clone(),
        Arc::new(DemoListingGenerator),
        settings.collector.clone(),
    ));

    // 5. Setup auth state
    let auth_state = AuthState::from(&settings.auth);

    // 6. Start HTTP server
    let app = routes::routes(registry, store, auth_state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
