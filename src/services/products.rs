//! Product catalogue maintenance and inventory queries.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::DbPool;
use crate::entities::product::{self, Entity as Product};
use crate::errors::ServiceError;
use crate::events::{Event, EventSender};

/// Input for creating or updating a product.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ProductInput {
    #[validate(length(min = 1))]
    pub code: String,
    #[validate(length(min = 1))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: i32,
    pub unit: Option<String>,
    #[validate(range(min = 0))]
    pub min_stock: i32,
    pub category: Option<String>,
    pub unit_price: Decimal,
    pub expires_at: Option<NaiveDate>,
}

/// Aggregate inventory figures for the dashboard header.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryStatistics {
    pub product_count: u64,
    pub total_units: i64,
    pub low_stock_count: u64,
    pub category_count: usize,
    pub inventory_value: Decimal,
    pub products_per_category: BTreeMap<String, u64>,
}

#[derive(Clone)]
pub struct ProductService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ProductService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Register a new product. Codes are unique.
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub async fn create(&self, input: ProductInput) -> Result<product::Model, ServiceError> {
        input.validate()?;

        let db = self.db_pool.as_ref();

        if self.get_by_code(&input.code).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Product code {} already exists",
                input.code
            )));
        }

        if input.unit_price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Unit price must not be negative".into(),
            ));
        }

        let product = product::ActiveModel {
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            quantity: Set(input.quantity),
            unit: Set(input.unit),
            min_stock: Set(input.min_stock),
            category: Set(input.category),
            unit_price: Set(input.unit_price),
            expires_at: Set(input.expires_at),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        info!(product_id = product.id, "product created");

        self.event_sender
            .send(Event::ProductCreated(product.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(product)
    }

    /// Update a product's catalogue fields. Stock mutations go through
    /// the order and reconciliation flows, never here.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i64,
        input: ProductInput,
    ) -> Result<product::Model, ServiceError> {
        input.validate()?;

        let db = self.db_pool.as_ref();
        let existing = self.get(id).await?;

        if input.code != existing.code {
            if let Some(other) = self.get_by_code(&input.code).await? {
                if other.id != id {
                    return Err(ServiceError::Conflict(format!(
                        "Product code {} already exists",
                        input.code
                    )));
                }
            }
        }

        if input.unit_price < Decimal::ZERO {
            return Err(ServiceError::ValidationError(
                "Unit price must not be negative".into(),
            ));
        }

        let mut active: product::ActiveModel = existing.into();
        active.code = Set(input.code);
        active.name = Set(input.name);
        active.description = Set(input.description);
        active.unit = Set(input.unit);
        active.min_stock = Set(input.min_stock);
        active.category = Set(input.category);
        active.unit_price = Set(input.unit_price);
        active.expires_at = Set(input.expires_at);
        let product = active.update(db).await?;

        self.event_sender
            .send(Event::ProductUpdated(product.id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let product = self.get(id).await?;
        Product::delete_by_id(product.id)
            .exec(self.db_pool.as_ref())
            .await?;

        self.event_sender
            .send(Event::ProductDeleted(id))
            .await
            .map_err(ServiceError::EventError)?;

        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<product::Model, ServiceError> {
        Product::find_by_id(id)
            .one(self.db_pool.as_ref())
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn get_by_code(&self, code: &str) -> Result<Option<product::Model>, ServiceError> {
        let product = Product::find()
            .filter(product::Column::Code.eq(code))
            .one(self.db_pool.as_ref())
            .await?;
        Ok(product)
    }

    /// All products ordered by name.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<product::Model>, ServiceError> {
        let products = Product::find()
            .order_by_asc(product::Column::Name)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(products)
    }

    /// Case-insensitive search over code and name.
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> Result<Vec<product::Model>, ServiceError> {
        let needle = term.to_lowercase();
        let products = self.list().await?;
        Ok(products
            .into_iter()
            .filter(|p| {
                p.code.to_lowercase().contains(&needle) || p.name.to_lowercase().contains(&needle)
            })
            .collect())
    }

    /// Distinct categories, sorted.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, ServiceError> {
        let products = self.list().await?;
        let mut categories: Vec<String> = products
            .into_iter()
            .filter_map(|p| p.category)
            .filter(|c| !c.is_empty())
            .collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    /// Products at or below their minimum stock threshold.
    #[instrument(skip(self))]
    pub async fn low_stock(&self) -> Result<Vec<product::Model>, ServiceError> {
        let products = Product::find()
            .filter(
                Expr::col(product::Column::Quantity).lte(Expr::col(product::Column::MinStock)),
            )
            .order_by_asc(product::Column::Quantity)
            .all(self.db_pool.as_ref())
            .await?;
        Ok(products)
    }

    #[instrument(skip(self))]
    pub async fn low_stock_count(&self) -> Result<u64, ServiceError> {
        let count = Product::find()
            .filter(
                Expr::col(product::Column::Quantity).lte(Expr::col(product::Column::MinStock)),
            )
            .count(self.db_pool.as_ref())
            .await?;
        Ok(count)
    }

    /// Aggregate catalogue figures, computed in one pass over the table.
    #[instrument(skip(self))]
    pub async fn statistics(&self) -> Result<InventoryStatistics, ServiceError> {
        let products = self.list().await?;

        let mut total_units: i64 = 0;
        let mut low_stock_count: u64 = 0;
        let mut inventory_value = Decimal::ZERO;
        let mut products_per_category: BTreeMap<String, u64> = BTreeMap::new();

        for product in &products {
            total_units += i64::from(product.quantity);
            if product.is_low_stock() {
                low_stock_count += 1;
            }
            inventory_value += Decimal::from(product.quantity) * product.unit_price;
            let category = product
                .category
                .clone()
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "Sin categoría".to_string());
            *products_per_category.entry(category).or_insert(0) += 1;
        }

        Ok(InventoryStatistics {
            product_count: products.len() as u64,
            total_units,
            low_stock_count,
            category_count: products_per_category.len(),
            inventory_value,
            products_per_category,
        })
    }
}
