// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// 商家列表实体
///
/// 表示一条已采集的商家数据，包含商家的基础信息、
/// 评分与销量等统计字段。`id` 由采集方提供，作为
/// 写入时的去重键：相同 `id` 的再次写入会整行覆盖。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    /// 商家唯一标识符，写入时的覆盖键
    pub id: String,
    /// 商家名称
    pub name: String,
    /// 所在城市
    pub city: String,
    /// 所在行政区
    pub district: String,
    /// 所在商圈
    pub business_district: String,
    /// 经营品类
    pub category: String,
    /// 联系电话
    pub phone: String,
    /// 评分，取值范围 0-5
    pub rating: f64,
    /// 月销量，非负整数
    pub monthly_sales: i64,
    /// 详细地址
    pub address: String,
    /// 采集时间，由存储层在写入时刷新
    pub crawl_time: DateTime<FixedOffset>,
}
