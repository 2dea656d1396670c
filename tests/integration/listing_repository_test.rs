// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_db;
use chrono::Utc;
use collectrs::domain::models::listing::Listing;
use collectrs::domain::repositories::listing_repository::{
    ListingFilters, ListingRepository, ListingStats,
};
use collectrs::infrastructure::repositories::listing_repo_impl::ListingRepositoryImpl;
use std::time::Duration;

fn sample_listing(id: &str, city: &str, rating: f64, monthly_sales: i64) -> Listing {
    Listing {
        id: id.to_string(),
        name: format!("测试商家{}", id),
        city: city.to_string(),
        district: "朝阳区".to_string(),
        business_district: "朝阳区商圈".to_string(),
        category: "快餐简餐".to_string(),
        phone: "13812345678".to_string(),
        rating,
        monthly_sales,
        address: "朝阳区路1号".to_string(),
        crawl_time: Utc::now().into(),
    }
}

/// 测试按 id 覆盖写入
///
/// 对同一 id 的多次写入只保留最后一次的字段值，
/// 且 crawl_time 被写入方刷新
#[tokio::test]
async fn test_upsert_replaces_row_by_id() {
    let db = create_test_db().await;
    let repo = ListingRepositoryImpl::new(db);

    let mut listing = sample_listing("bj0001", "北京", 4.5, 1000);
    listing.name = "第一版".to_string();
    repo.upsert(&listing).await.unwrap();

    let rows = repo.query(&ListingFilters::default()).await.unwrap();
    assert_eq!(rows.len(), 1);
    let first_crawl_time = rows[0].crawl_time;

    tokio::time::sleep(Duration::from_millis(15)).await;

    listing.name = "第二版".to_string();
    listing.rating = 3.9;
    repo.upsert(&listing).await.unwrap();

    let rows = repo.query(&ListingFilters::default()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "第二版");
    assert_eq!(rows[0].rating, 3.9);
    assert!(rows[0].crawl_time > first_crawl_time);
}

/// 测试空表统计
///
/// 所有聚合值为 0，而不是错误
#[tokio::test]
async fn test_statistics_on_empty_table() {
    let db = create_test_db().await;
    let repo = ListingRepositoryImpl::new(db);

    let stats = repo.statistics().await.unwrap();
    assert_eq!(
        stats,
        ListingStats {
            total: 0,
            avg_rating: 0.0,
            avg_sales: 0,
            city_count: 0,
        }
    );
}

/// 测试聚合统计
///
/// 平均评分只统计评分大于 0 的行并保留两位小数；
/// 平均销量只统计销量大于 0 的行并截断为整数
#[tokio::test]
async fn test_statistics_aggregates() {
    let db = create_test_db().await;
    let repo = ListingRepositoryImpl::new(db);

    repo.upsert(&sample_listing("bj0001", "北京", 4.0, 100))
        .await
        .unwrap();
    repo.upsert(&sample_listing("bj0002", "北京", 4.5, 201))
        .await
        .unwrap();
    // 评分和销量为 0 的行不进入对应均值
    repo.upsert(&sample_listing("sh0001", "上海", 0.0, 0))
        .await
        .unwrap();

    let stats = repo.statistics().await.unwrap();
    assert_eq!(stats.total, 3);
    assert_eq!(stats.avg_rating, 4.25);
    assert_eq!(stats.avg_sales, 150);
    assert_eq!(stats.city_count, 2);
}

/// 测试城市过滤与排序
///
/// 空过滤返回全量，city 为精确匹配，结果按采集时间降序
#[tokio::test]
async fn test_query_filter_and_ordering() {
    let db = create_test_db().await;
    let repo = ListingRepositoryImpl::new(db);

    for (id, city) in [("bj0001", "北京"), ("sh0001", "上海"), ("bj0002", "北京")] {
        repo.upsert(&sample_listing(id, city, 4.0, 100))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let all = repo.query(&ListingFilters::default()).await.unwrap();
    assert_eq!(all.len(), 3);
    // 最后写入的排最前
    assert_eq!(all[0].id, "bj0002");
    assert_eq!(all[2].id, "bj0001");
    for pair in all.windows(2) {
        assert!(pair[0].crawl_time >= pair[1].crawl_time);
    }

    let beijing = repo
        .query(&ListingFilters {
            city: Some("北京".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(beijing.len(), 2);
    assert!(beijing.iter().all(|row| row.city == "北京"));

    let chengdu = repo
        .query(&ListingFilters {
            city: Some("成都".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(chengdu.is_empty());
}

/// 测试评分下限与关键词过滤
#[tokio::test]
async fn test_query_min_rating_and_keyword() {
    let db = create_test_db().await;
    let repo = ListingRepositoryImpl::new(db);

    let mut noodle_shop = sample_listing("bj0001", "北京", 4.8, 500);
    noodle_shop.name = "兰州拉面（朝阳区店）".to_string();
    repo.upsert(&noodle_shop).await.unwrap();

    let mut coffee_shop = sample_listing("bj0002", "北京", 3.6, 300);
    coffee_shop.name = "星巴克（海淀区店）".to_string();
    coffee_shop.category = "咖啡".to_string();
    repo.upsert(&coffee_shop).await.unwrap();

    let highly_rated = repo
        .query(&ListingFilters {
            min_rating: Some(4.0),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(highly_rated.len(), 1);
    assert_eq!(highly_rated[0].id, "bj0001");

    let by_name = repo
        .query(&ListingFilters {
            keyword: Some("拉面".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, "bj0001");

    let by_category = repo
        .query(&ListingFilters {
            keyword: Some("咖啡".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].id, "bj0002");

    let combined = repo
        .query(&ListingFilters {
            city: Some("北京".to_string()),
            min_rating: Some(4.0),
            keyword: Some("咖啡".to_string()),
        })
        .await
        .unwrap();
    assert!(combined.is_empty());
}

/// 测试查询行数上限
///
/// 超过 1000 行时只返回最近的 1000 行
#[tokio::test]
async fn test_query_caps_result_rows() {
    let db = create_test_db().await;
    let repo = ListingRepositoryImpl::new(db);

    for i in 0..1005 {
        repo.upsert(&sample_listing(&format!("bj{:04}", i), "北京", 4.0, 100))
            .await
            .unwrap();
    }

    let rows = repo.query(&ListingFilters::default()).await.unwrap();
    assert_eq!(rows.len(), 1000);

    let stats = repo.statistics().await.unwrap();
    assert_eq!(stats.total, 1005);
}
