// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct StartCollectDto {
    /// 目标城市
    #[validate(length(min = 1, message = "city cannot be empty"))]
    pub city: String,
    /// 计划采集条数，缺省使用配置默认值
    #[validate(range(min = 1, max = 1000, message = "max_results is invalid"))]
    pub max_results: Option<u32>,
}

/// 商家列表查询参数
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListingQueryDto {
    /// 城市精确过滤，空串等同于不过滤
    pub city: Option<String>,
    /// 评分下限过滤
    pub min_rating: Option<f64>,
    /// 名称、地址或品类的关键词过滤
    pub keyword: Option<String>,
}
