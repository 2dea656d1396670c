// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Query},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;

use crate::{
    application::dto::collect_request::ListingQueryDto,
    domain::repositories::listing_repository::ListingFilters,
    domain::services::listing_store::ListingStore,
};

/// 查询商家数据列表
///
/// 零行结果作为正常的"暂无数据"信号返回，不是错误
pub async fn list_listings(
    Extension(store): Extension<Arc<ListingStore>>,
    Query(params): Query<ListingQueryDto>,
) -> impl IntoResponse {
    let filters = ListingFilters {
        city: params.city.filter(|city| !city.is_empty()),
        min_rating: params.min_rating,
        keyword: params.keyword.filter(|keyword| !keyword.is_empty()),
    };

    let rows = store.query(&filters).await;

    Json(json!({
        "success": true,
        "count": rows.len(),
        "data": rows
    }))
}

/// 获取商家数据统计
pub async fn get_statistics(Extension(store): Extension<Arc<ListingStore>>) -> impl IntoResponse {
    let stats = store.statistics().await;
    Json(stats)
}
