// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use collectrs::config::settings::{CollectorSettings, DatabaseSettings};
use collectrs::domain::models::job::{CollectJob, JobStatus};
use collectrs::domain::services::listing_store::ListingStore;
use collectrs::infrastructure::database::connection;
use collectrs::infrastructure::repositories::listing_repo_impl::ListingRepositoryImpl;
use collectrs::presentation::middleware::auth_middleware::AuthState;
use collectrs::presentation::routes;
use collectrs::registry::JobRegistry;
use collectrs::workers::generator::DemoListingGenerator;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub db: Arc<DatabaseConnection>,
    pub registry: Arc<JobRegistry>,
    pub store: Arc<ListingStore>,
    pub admin_key: String,
    pub user_key: String,
}

/// 测试用采集器配置，间隔压到最小以加快用例
pub fn fast_collector_settings() -> CollectorSettings {
    CollectorSettings {
        default_total: 5,
        item_delay_ms: 1,
    }
}

/// 创建内存数据库并执行迁移
///
/// 内存库只保留一个连接，池内多连接会各自持有独立的库
pub async fn create_test_db() -> Arc<DatabaseConnection> {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: Some(1),
        min_connections: Some(1),
        connect_timeout: Some(5),
        idle_timeout: None,
    };

    let db = connection::create_pool(&settings)
        .await
        .expect("failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");

    Arc::new(db)
}

/// 创建直接面向注册表的测试组件
pub async fn create_test_registry(
    settings: CollectorSettings,
) -> (Arc<JobRegistry>, Arc<ListingStore>, Arc<DatabaseConnection>) {
    let db = create_test_db().await;
    let repo = Arc::new(ListingRepositoryImpl::new(db.clone()));
    let store = Arc::new(ListingStore::new(repo));
    let registry = Arc::new(JobRegistry::new(
        store.clone(),
        Arc::new(DemoListingGenerator),
        settings,
    ));
    (registry, store, db)
}

/// 创建完整的HTTP测试应用
pub async fn create_test_app() -> TestApp {
    let (registry, store, db) = create_test_registry(fast_collector_settings()).await;

    let admin_key = "test-admin-key".to_string();
    let user_key = "test-user-key".to_string();
    let auth_state = AuthState {
        admin_key: admin_key.clone(),
        user_key: user_key.clone(),
    };

    let app = routes::routes(registry.clone(), store.clone(), auth_state);
    let server = TestServer::new(app).expect("failed to start test server");

    TestApp {
        server,
        db,
        registry,
        store,
        admin_key,
        user_key,
    }
}

/// 轮询任务直到离开 Running 状态
pub async fn wait_for_terminal(registry: &JobRegistry, job_id: &str) -> CollectJob {
    for _ in 0..1000 {
        let job = registry.snapshot(job_id).expect("job must exist");
        if job.status != JobStatus::Running {
            return job;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("job {} did not reach a terminal state in time", job_id);
}
