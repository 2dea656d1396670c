// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::services::listing_store::ListingStore;
use crate::presentation::handlers::{collect_handler, listing_handler};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};
use crate::registry::JobRegistry;
use axum::{
    routing::{delete, get, post},
    Extension, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// 创建应用路由
///
/// # 参数
///
/// * `registry` - 任务注册表
/// * `store` - 商家数据存储服务
/// * `auth_state` - 认证状态
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(
    registry: Arc<JobRegistry>,
    store: Arc<ListingStore>,
    auth_state: AuthState,
) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let protected_routes = Router::new()
        .route("/v1/collect", post(collect_handler::start_collect))
        .route("/v1/collect/{id}", get(collect_handler::get_collect_status))
        .route("/v1/collect/{id}", delete(collect_handler::cancel_collect))
        .route("/v1/listings", get(listing_handler::list_listings))
        .route("/v1/listings/stats", get(listing_handler::get_statistics))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(registry))
        .layer(Extension(store))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
