// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::listing::Listing;
use crate::domain::repositories::listing_repository::{
    ListingFilters, ListingRepository, ListingStats, RepositoryError,
};
use crate::infrastructure::database::entities::listing as listing_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
};
use std::sync::Arc;

/// 单次查询返回的最大行数
///
/// 有意设置的响应体积上限，不是错误条件
const MAX_QUERY_ROWS: u64 = 1000;

/// 商家仓库实现
///
/// 基于SeaORM实现的商家数据访问层
#[derive(Clone)]
pub struct ListingRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl ListingRepositoryImpl {
    /// 创建新的商家仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn scalar_f64(&self, sql: &str) -> Result<Option<f64>, RepositoryError> {
        let backend = self.db.get_database_backend();
        let row = self
            .db
            .query_one(Statement::from_string(backend, sql.to_owned()))
            .await?;
        match row {
            Some(row) => Ok(row.try_get_by_index::<Option<f64>>(0).map_err(DbErr::from)?),
            None => Ok(None),
        }
    }

    async fn scalar_i64(&self, sql: &str) -> Result<i64, RepositoryError> {
        let backend = self.db.get_database_backend();
        let row = self
            .db
            .query_one(Statement::from_string(backend, sql.to_owned()))
            .await?;
        match row {
            Some(row) => Ok(row.try_get_by_index::<i64>(0).map_err(DbErr::from)?),
            None => Ok(0),
        }
    }
}

impl From<listing_entity::Model> for Listing {
    fn from(model: listing_entity::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            city: model.city,
            district: model.district,
            business_district: model.business_district,
            category: model.category,
            phone: model.phone,
            rating: model.rating,
            monthly_sales: model.monthly_sales,
            address: model.address,
            crawl_time: model.crawl_time,
        }
    }
}

impl From<Listing> for listing_entity::ActiveModel {
    fn from(listing: Listing) -> Self {
        Self {
            id: Set(listing.id),
            name: Set(listing.name),
            city: Set(listing.city),
            district: Set(listing.district),
            business_district: Set(listing.business_district),
            category: Set(listing.category),
            phone: Set(listing.phone),
            rating: Set(listing.rating),
            monthly_sales: Set(listing.monthly_sales),
            address: Set(listing.address),
            crawl_time: Set(listing.crawl_time),
        }
    }
}

#[async_trait]
impl ListingRepository for ListingRepositoryImpl {
    async fn upsert(&self, listing: &Listing) -> Result<(), RepositoryError> {
        let mut model: listing_entity::ActiveModel = listing.clone().into();
        // 覆盖写入时由服务端刷新采集时间
        model.crawl_time = Set(Utc::now().into());

        listing_entity::Entity::insert(model)
            .on_conflict(
                OnConflict::column(listing_entity::Column::Id)
                    .update_columns([
                        listing_entity::Column::Name,
                        listing_entity::Column::City,
                        listing_entity::Column::District,
                        listing_entity::Column::BusinessDistrict,
                        listing_entity::Column::Category,
                        listing_entity::Column::Phone,
                        listing_entity::Column::Rating,
                        listing_entity::Column::MonthlySales,
                        listing_entity::Column::Address,
                        listing_entity::Column::CrawlTime,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db.as_ref())
            .await?;

        Ok(())
    }

    async fn query(&self, filters: &ListingFilters) -> Result<Vec<Listing>, RepositoryError> {
        let mut select = listing_entity::Entity::find();

        if let Some(city) = &filters.city {
            select = select.filter(listing_entity::Column::City.eq(city.as_str()));
        }

        if let Some(min_rating) = filters.min_rating {
            select = select.filter(listing_entity::Column::Rating.gte(min_rating));
        }

        if let Some(keyword) = &filters.keyword {
            let pattern = format!("%{}%", keyword);
            select = select.filter(
                Condition::any()
                    .add(listing_entity::Column::Name.like(pattern.as_str()))
                    .add(listing_entity::Column::Address.like(pattern.as_str()))
                    .add(listing_entity::Column::Category.like(pattern.as_str())),
            );
        }

        let models = select
            .order_by_desc(listing_entity::Column::CrawlTime)
            .limit(MAX_QUERY_ROWS)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn statistics(&self) -> Result<ListingStats, RepositoryError> {
        let total = listing_entity::Entity::find()
            .count(self.db.as_ref())
            .await?;

        let avg_rating = self
            .scalar_f64("SELECT AVG(rating) FROM listings WHERE rating > 0")
            .await?
            .map(|avg| (avg * 100.0).round() / 100.0)
            .unwrap_or(0.0);

        let avg_sales = self
            .scalar_f64("SELECT AVG(monthly_sales) FROM listings WHERE monthly_sales > 0")
            .await?
            .map(|avg| avg as i64)
            .unwrap_or(0);

        let city_count = self
            .scalar_i64("SELECT COUNT(DISTINCT city) FROM listings")
            .await? as u64;

        Ok(ListingStats {
            total,
            avg_rating,
            avg_sales,
            city_count,
        })
    }
}
