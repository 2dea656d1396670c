// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::Listing;
use async_trait::async_trait;
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 商家查询参数
///
/// 所有过滤条件可自由组合；全部为空时返回全量集合。
#[derive(Debug, Default, Clone)]
pub struct ListingFilters {
    /// 城市精确匹配
    pub city: Option<String>,
    /// 评分下限
    pub min_rating: Option<f64>,
    /// 关键词，对名称、地址和品类做模糊匹配
    pub keyword: Option<String>,
}

/// 商家数据统计结果
///
/// 所有聚合值在空表时均为 0，不产生错误。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingStats {
    /// 总条数
    pub total: u64,
    /// 评分大于 0 的行的平均评分，保留两位小数
    pub avg_rating: f64,
    /// 月销量大于 0 的行的平均销量，截断为整数
    pub avg_sales: i64,
    /// 不同城市数量
    pub city_count: u64,
}

/// 商家仓库特质
///
/// 定义商家数据访问接口
#[async_trait]
pub trait ListingRepository: Send + Sync {
    /// 按 id 覆盖写入一条商家数据，crawl_time 由写入方刷新
    async fn upsert(&self, listing: &Listing) -> Result<(), RepositoryError>;
    /// 按条件查询，crawl_time 降序，最多返回 1000 行
    async fn query(&self, filters: &ListingFilters) -> Result<Vec<Listing>, RepositoryError>;
    /// 获取聚合统计信息
    async fn statistics(&self) -> Result<ListingStats, RepositoryError>;
}
