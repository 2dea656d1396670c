// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::Listing;
use anyhow::Result;
use chrono::Utc;
use rand::Rng;

/// 商家数据生成策略
///
/// 采集运行器通过该接口逐条取得候选数据，生成方式
/// 可替换：演示实现从固定词表随机采样，不做任何网络抓取。
pub trait ListingGenerator: Send + Sync {
    /// 为指定任务生成第 `index` 条候选商家数据
    fn generate(&self, city: &str, job_id: &str, index: u32) -> Result<Listing>;
}

/// 品牌名词表
const BRAND_NAMES: &[&str] = &[
    "肯德基",
    "麦当劳",
    "海底捞",
    "星巴克",
    "必胜客",
    "真功夫",
    "永和大王",
];

/// 行政区词表
const DISTRICTS: &[&str] = &["朝阳区", "海淀区", "东城区", "西城区", "丰台区"];

/// 品类词表
const CATEGORIES: &[&str] = &["快餐简餐", "火锅", "咖啡", "西餐", "中餐"];

/// 演示数据生成器
///
/// 从固定词表与随机数值区间合成商家数据。
/// 商家 id 由城市前缀、任务 id 尾部与条目序号拼接，
/// 同一任务内保证唯一。
pub struct DemoListingGenerator;

impl ListingGenerator for DemoListingGenerator {
    fn generate(&self, city: &str, job_id: &str, index: u32) -> Result<Listing> {
        let mut rng = rand::rng();

        let district = DISTRICTS[rng.random_range(0..DISTRICTS.len())];
        let brand = BRAND_NAMES[rng.random_range(0..BRAND_NAMES.len())];
        let category = CATEGORIES[rng.random_range(0..CATEGORIES.len())];

        let city_prefix: String = city.chars().take(2).collect();
        // 任务 id 为 ASCII，按字节取尾部即可
        let id_tail = &job_id[job_id.len().saturating_sub(6)..];

        Ok(Listing {
            id: format!("{}{}{:04}", city_prefix, id_tail, index),
            name: format!("{}（{}店）", brand, district),
            city: city.to_string(),
            district: district.to_string(),
            business_district: format!("{}商圈", district),
            category: category.to_string(),
            phone: format!(
                "1{}{:08}",
                rng.random_range(30..40),
                rng.random_range(10_000_000..100_000_000)
            ),
            rating: (rng.random_range(3.5..=5.0f64) * 10.0).round() / 10.0,
            monthly_sales: rng.random_range(100..=20_000),
            address: format!("{}路{}号", district, rng.random_range(1..1000)),
            crawl_time: Utc::now().into(),
        })
    }
}
