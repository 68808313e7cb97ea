//! Product service: CRUD and the derived listing view

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{resolve_location, Product, ProductOverview, StockStatus};
use shared::validation::validate_sku;

/// Product service
#[derive(Clone)]
pub struct ProductService {
    db: PgPool,
}

/// Input for creating a product
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductInput {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    pub sku: String,
    #[validate(length(min = 1, message = "Category must not be empty"))]
    pub category: String,
    pub unit_price: Decimal,
    pub quantity: Option<i32>,
    pub low_stock_limit: i32,
}

/// Input for updating a product; omitted fields keep their current value
#[derive(Debug, Deserialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category: Option<String>,
    pub unit_price: Option<Decimal>,
    pub quantity: Option<i32>,
    pub low_stock_limit: Option<i32>,
}

/// Product row
#[derive(Debug, FromRow)]
struct ProductRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    sku: String,
    category: String,
    unit_price: Decimal,
    quantity: i32,
    low_stock_limit: i32,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            sku: row.sku,
            category: row.category,
            unit_price: row.unit_price,
            quantity: row.quantity,
            low_stock_limit: row.low_stock_limit,
            created_at: row.created_at,
        }
    }
}

/// Row for the listing view: product plus its latest transfer destination
#[derive(Debug, FromRow)]
struct OverviewRow {
    id: Uuid,
    name: String,
    sku: String,
    category: String,
    quantity: i32,
    low_stock_limit: i32,
    latest_destination: Option<String>,
}

const PRODUCT_COLUMNS: &str =
    "id, owner_id, name, sku, category, unit_price, quantity, low_stock_limit, created_at";

impl ProductService {
    /// Create a new ProductService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List the owner's products with derived stock status and location.
    ///
    /// The latest-transfer lookup runs as a lateral join, one query for the
    /// whole listing; the result is the same as a per-product lookup of the
    /// most recent transfer by date.
    pub async fn list_overview(&self, owner_id: Uuid) -> AppResult<Vec<ProductOverview>> {
        let rows = sqlx::query_as::<_, OverviewRow>(
            r#"
            SELECT p.id, p.name, p.sku, p.category, p.quantity, p.low_stock_limit,
                   t.to_location AS latest_destination
            FROM products p
            LEFT JOIN LATERAL (
                SELECT to_location
                FROM transfers
                WHERE product_id = p.id AND owner_id = p.owner_id
                ORDER BY date DESC, created_at DESC
                LIMIT 1
            ) t ON TRUE
            WHERE p.owner_id = $1
            ORDER BY p.name
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| ProductOverview {
                id: r.id,
                name: r.name,
                sku: r.sku,
                category: r.category,
                stock: r.quantity,
                status: StockStatus::derive(r.quantity, r.low_stock_limit),
                location: resolve_location(r.latest_destination),
            })
            .collect())
    }

    /// Create a product for the owner
    pub async fn create(&self, owner_id: Uuid, input: CreateProductInput) -> AppResult<Product> {
        input.validate()?;
        validate_sku(&input.sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;

        let quantity = input.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity cannot be negative".to_string(),
            });
        }

        // Validate the owner exists before accepting the write
        let owner_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(owner_id)
                .fetch_one(&self.db)
                .await?;
        if !owner_exists {
            return Err(AppError::NotFound("Owner".to_string()));
        }

        let sku_taken =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM products WHERE sku = $1)")
                .bind(&input.sku)
                .fetch_one(&self.db)
                .await?;
        if sku_taken {
            return Err(AppError::DuplicateEntry("sku".to_string()));
        }

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            INSERT INTO products (owner_id, name, sku, category, unit_price, quantity, low_stock_limit)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(owner_id)
        .bind(&input.name)
        .bind(&input.sku)
        .bind(&input.category)
        .bind(input.unit_price)
        .bind(quantity)
        .bind(input.low_stock_limit)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a product; omitted fields keep their current value
    pub async fn update(
        &self,
        owner_id: Uuid,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> AppResult<Product> {
        let existing = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 AND owner_id = $2"
        ))
        .bind(product_id)
        .bind(owner_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let name = input.name.unwrap_or(existing.name);
        let sku = input.sku.unwrap_or(existing.sku.clone());
        let category = input.category.unwrap_or(existing.category);
        let unit_price = input.unit_price.unwrap_or(existing.unit_price);
        let quantity = input.quantity.unwrap_or(existing.quantity);
        let low_stock_limit = input.low_stock_limit.unwrap_or(existing.low_stock_limit);

        if name.is_empty() {
            return Err(AppError::Validation {
                field: "name".to_string(),
                message: "Name must not be empty".to_string(),
            });
        }
        validate_sku(&sku).map_err(|msg| AppError::Validation {
            field: "sku".to_string(),
            message: msg.to_string(),
        })?;
        if quantity < 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity cannot be negative".to_string(),
            });
        }

        if sku != existing.sku {
            let sku_taken = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM products WHERE sku = $1 AND id <> $2)",
            )
            .bind(&sku)
            .bind(product_id)
            .fetch_one(&self.db)
            .await?;
            if sku_taken {
                return Err(AppError::DuplicateEntry("sku".to_string()));
            }
        }

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r#"
            UPDATE products
            SET name = $1, sku = $2, category = $3, unit_price = $4, quantity = $5, low_stock_limit = $6
            WHERE id = $7 AND owner_id = $8
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&name)
        .bind(&sku)
        .bind(&category)
        .bind(unit_price)
        .bind(quantity)
        .bind(low_stock_limit)
        .bind(product_id)
        .bind(owner_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Fetch a single product by id
    pub async fn get(&self, product_id: Uuid) -> AppResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(product_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        Ok(row.into())
    }
}
