//! PostgreSQL implementation of SaleRepository.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::support::{column, count, db_error, not_found, timestamp};
use crate::domain::foundation::{DomainError, EmployeeId, ErrorCode, ProductId, SaleId};
use crate::domain::sales::Sale;
use crate::ports::SaleRepository;

const SALE_COLUMNS: &str =
    "id, product_id, employee_id, currency, amount, quantity, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresSaleRepository {
    pool: PgPool,
}

impl PostgresSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SaleRepository for PostgresSaleRepository {
    async fn save(&self, sale: &Sale) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO sales (
                id, product_id, employee_id, currency, amount, quantity, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(sale.id().as_uuid())
        .bind(sale.product_id().as_uuid())
        .bind(sale.employee_id().as_uuid())
        .bind(sale.currency())
        .bind(sale.amount())
        .bind(i64::from(sale.quantity()))
        .bind(sale.created_at().as_datetime())
        .bind(sale.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("insert sale"))?;

        Ok(())
    }

    async fn update(&self, sale: &Sale) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE sales SET
                product_id = $2, employee_id = $3, currency = $4, amount = $5,
                quantity = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(sale.id().as_uuid())
        .bind(sale.product_id().as_uuid())
        .bind(sale.employee_id().as_uuid())
        .bind(sale.currency())
        .bind(sale.amount())
        .bind(i64::from(sale.quantity()))
        .bind(sale.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update sale"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::SaleNotFound, sale.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &SaleId) -> Result<Option<Sale>, DomainError> {
        let query = format!("SELECT {} FROM sales WHERE id = $1", SALE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch sale"))?;
        row.as_ref().map(row_to_sale).transpose()
    }

    async fn list(&self) -> Result<Vec<Sale>, DomainError> {
        let query = format!("SELECT {} FROM sales ORDER BY created_at", SALE_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list sales"))?;
        rows.iter().map(row_to_sale).collect()
    }

    async fn list_by_employee(&self, employee_id: &EmployeeId) -> Result<Vec<Sale>, DomainError> {
        let query = format!(
            "SELECT {} FROM sales WHERE employee_id = $1 ORDER BY created_at",
            SALE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(employee_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list sales for employee"))?;
        rows.iter().map(row_to_sale).collect()
    }

    async fn delete(&self, id: &SaleId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete sale"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::SaleNotFound, id));
        }
        Ok(())
    }
}

fn row_to_sale(row: &PgRow) -> Result<Sale, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let product_id: uuid::Uuid = column(row, "product_id")?;
    let employee_id: uuid::Uuid = column(row, "employee_id")?;
    Ok(Sale::reconstitute(
        SaleId::from_uuid(id),
        ProductId::from_uuid(product_id),
        EmployeeId::from_uuid(employee_id),
        column(row, "currency")?,
        column(row, "amount")?,
        count(row, "quantity")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}
