//! PostgreSQL implementation of ProductRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::support::{column, count, db_error, not_found, timestamp};
use crate::domain::catalog::{Price, Product, ProductDetails};
use crate::domain::foundation::{DomainError, ErrorCode, ProductId};
use crate::ports::ProductRepository;

const PRODUCT_COLUMNS: &str = r#"
    id, name, description, price_amount, price_currency, depo, category, brand,
    num_in_stock, colors, sizes, images, rating, num_reviews, created_at, updated_at
"#;

#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn save(&self, product: &Product) -> Result<(), DomainError> {
        let d = product.details();
        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_amount, price_currency, depo, category, brand,
                num_in_stock, colors, sizes, images, rating, num_reviews, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(&d.name)
        .bind(&d.description)
        .bind(d.price.amount())
        .bind(d.price.currency())
        .bind(&d.depo)
        .bind(&d.category)
        .bind(&d.brand)
        .bind(i64::from(d.num_in_stock))
        .bind(&d.colors)
        .bind(&d.sizes)
        .bind(product.images())
        .bind(product.rating())
        .bind(i64::from(product.num_reviews()))
        .bind(product.created_at().as_datetime())
        .bind(product.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert product"))?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), DomainError> {
        let d = product.details();
        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = $2, description = $3, price_amount = $4, price_currency = $5,
                depo = $6, category = $7, brand = $8, num_in_stock = $9, colors = $10,
                sizes = $11, images = $12, rating = $13, num_reviews = $14, updated_at = $15
            WHERE id = $1
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(&d.name)
        .bind(&d.description)
        .bind(d.price.amount())
        .bind(d.price.currency())
        .bind(&d.depo)
        .bind(&d.category)
        .bind(&d.brand)
        .bind(i64::from(d.num_in_stock))
        .bind(&d.colors)
        .bind(&d.sizes)
        .bind(product.images())
        .bind(product.rating())
        .bind(i64::from(product.num_reviews()))
        .bind(product.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update product"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::ProductNotFound, product.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let query = format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch product"))?;
        row.as_ref().map(row_to_product).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Product>, DomainError> {
        let query = format!(
            "SELECT {} FROM products WHERE lower(name) = lower($1) ORDER BY created_at LIMIT 1",
            PRODUCT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(name.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch product by name"))?;
        row.as_ref().map(row_to_product).transpose()
    }

    async fn list(&self) -> Result<Vec<Product>, DomainError> {
        let query = format!("SELECT {} FROM products ORDER BY created_at", PRODUCT_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list products"))?;
        rows.iter().map(row_to_product).collect()
    }

    async fn exists(&self, id: &ProductId) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1) AS present")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("check product"))?;
        column(&row, "present")
    }

    async fn delete(&self, id: &ProductId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete product"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::ProductNotFound, id));
        }
        Ok(())
    }
}

fn row_to_product(row: &PgRow) -> Result<Product, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let amount: f64 = column(row, "price_amount")?;
    let currency: String = column(row, "price_currency")?;
    let price = Price::new(amount, currency).map_err(|e| {
        DomainError::new(ErrorCode::DatabaseError, format!("Stored price is invalid: {}", e))
    })?;

    let details = ProductDetails {
        name: column(row, "name")?,
        description: column(row, "description")?,
        price,
        depo: column(row, "depo")?,
        category: column(row, "category")?,
        brand: column(row, "brand")?,
        num_in_stock: count(row, "num_in_stock")?,
        colors: column(row, "colors")?,
        sizes: column(row, "sizes")?,
    };

    Ok(Product::reconstitute(
        ProductId::from_uuid(id),
        details,
        column(row, "images")?,
        column(row, "rating")?,
        count(row, "num_reviews")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}
