// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::Listing;
use crate::domain::repositories::listing_repository::{
    ListingFilters, ListingRepository, ListingStats,
};
use std::sync::Arc;
use tracing::error;

/// 商家数据存储服务
///
/// 在仓库之上实现面向看板的降级语义：任何存储故障都在
/// 此处截获并记录日志，调用方得到无害的默认值（false、
/// 空序列、全零统计），而不是向上传播的错误。查询得到
/// 零行是正常的可上报结果，不视为存储故障。
pub struct ListingStore {
    repository: Arc<dyn ListingRepository>,
}

impl ListingStore {
    /// 创建新的存储服务实例
    ///
    /// # 参数
    ///
    /// * `repository` - 商家仓库实现
    pub fn new(repository: Arc<dyn ListingRepository>) -> Self {
        Self { repository }
    }

    /// 按 id 覆盖写入一条商家数据
    ///
    /// # 返回值
    ///
    /// 写入成功返回 true；任何存储故障记录日志后返回 false
    pub async fn upsert(&self, listing: &Listing) -> bool {
        match self.repository.upsert(listing).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to save listing {}: {}", listing.id, e);
                false
            }
        }
    }

    /// 按条件查询商家数据
    ///
    /// # 返回值
    ///
    /// 查询结果序列；存储故障时记录日志并返回空序列
    pub async fn query(&self, filters: &ListingFilters) -> Vec<Listing> {
        match self.repository.query(filters).await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Failed to query listings: {}", e);
                Vec::new()
            }
        }
    }

    /// 获取聚合统计信息
    ///
    /// # 返回值
    ///
    /// 统计结果；存储故障时记录日志并返回全零统计
    pub async fn statistics(&self) -> ListingStats {
        match self.repository.statistics().await {
            Ok(stats) => stats,
            Err(e) => {
                error!("Failed to compute listing statistics: {}", e);
                ListingStats::default()
            }
        }
    }
}
