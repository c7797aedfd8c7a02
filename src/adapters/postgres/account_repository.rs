//! PostgreSQL implementations of the account ports.
//!
//! Admins and customers share the profile columns; cart lines reference
//! their customer with `ON DELETE CASCADE`.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::support::{column, count, db_error, is_unique_violation, not_found, timestamp};
use crate::domain::account::{AccountProfile, Admin, CartItem, Customer};
use crate::domain::foundation::{
    AdminId, CartItemId, CustomerId, DomainError, ErrorCode, ProductId,
};
use crate::ports::{AdminRepository, CartRepository, CustomerRepository};

const PROFILE_COLUMNS: &str =
    "id, email, first_name, last_name, user_name, phone, avatar, password_hash, created_at, updated_at";

/// PostgreSQL implementation of AdminRepository.
#[derive(Clone)]
pub struct PostgresAdminRepository {
    pool: PgPool,
}

impl PostgresAdminRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AdminRepository for PostgresAdminRepository {
    async fn save(&self, admin: &Admin) -> Result<(), DomainError> {
        let p = admin.profile();
        sqlx::query(
            r#"
            INSERT INTO admins (
                id, email, first_name, last_name, user_name, phone, avatar,
                password_hash, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(admin.id().as_uuid())
        .bind(&p.email)
        .bind(&p.first_name)
        .bind(&p.last_name)
        .bind(&p.user_name)
        .bind(&p.phone)
        .bind(&p.avatar)
        .bind(admin.password_hash())
        .bind(admin.created_at().as_datetime())
        .bind(admin.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| email_conflict(e, &p.email, "insert admin"))?;

        Ok(())
    }

    async fn update(&self, admin: &Admin) -> Result<(), DomainError> {
        let p = admin.profile();
        let result = sqlx::query(
            r#"
            UPDATE admins SET
                email = $2, first_name = $3, last_name = $4, user_name = $5,
                phone = $6, avatar = $7, password_hash = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(admin.id().as_uuid())
        .bind(&p.email)
        .bind(&p.first_name)
        .bind(&p.last_name)
        .bind(&p.user_name)
        .bind(&p.phone)
        .bind(&p.avatar)
        .bind(admin.password_hash())
        .bind(admin.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| email_conflict(e, &p.email, "update admin"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::AdminNotFound, admin.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &AdminId) -> Result<Option<Admin>, DomainError> {
        let query = format!("SELECT {} FROM admins WHERE id = $1", PROFILE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch admin"))?;
        row.as_ref().map(row_to_admin).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, DomainError> {
        let query = format!("SELECT {} FROM admins WHERE email = $1", PROFILE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(email.trim().to_lowercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch admin by email"))?;
        row.as_ref().map(row_to_admin).transpose()
    }

    async fn list(&self) -> Result<Vec<Admin>, DomainError> {
        let query = format!("SELECT {} FROM admins ORDER BY created_at", PROFILE_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list admins"))?;
        rows.iter().map(row_to_admin).collect()
    }

    async fn has_any(&self) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM admins) AS present")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("check for admins"))?;
        column(&row, "present")
    }

    async fn delete(&self, id: &AdminId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM admins WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete admin"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::AdminNotFound, id));
        }
        Ok(())
    }
}

/// PostgreSQL implementation of CustomerRepository.
#[derive(Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, filter: &str, value: &str) -> Result<Option<Customer>, DomainError> {
        let query = format!(
            "SELECT {}, social_id FROM customers WHERE {} = $1",
            PROFILE_COLUMNS, filter
        );
        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch customer"))?;
        row.as_ref().map(row_to_customer).transpose()
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn save(&self, customer: &Customer) -> Result<(), DomainError> {
        let p = customer.profile();
        sqlx::query(
            r#"
            INSERT INTO customers (
                id, social_id, email, first_name, last_name, user_name, phone,
                avatar, password_hash, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(customer.id().as_uuid())
        .bind(customer.social_id())
        .bind(&p.email)
        .bind(&p.first_name)
        .bind(&p.last_name)
        .bind(&p.user_name)
        .bind(&p.phone)
        .bind(&p.avatar)
        .bind(customer.password_hash())
        .bind(customer.created_at().as_datetime())
        .bind(customer.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| email_conflict(e, &p.email, "insert customer"))?;

        Ok(())
    }

    async fn update(&self, customer: &Customer) -> Result<(), DomainError> {
        let p = customer.profile();
        let result = sqlx::query(
            r#"
            UPDATE customers SET
                email = $2, first_name = $3, last_name = $4, user_name = $5,
                phone = $6, avatar = $7, password_hash = $8, updated_at = $9
            WHERE id = $1
            "#,
        )
        .bind(customer.id().as_uuid())
        .bind(&p.email)
        .bind(&p.first_name)
        .bind(&p.last_name)
        .bind(&p.user_name)
        .bind(&p.phone)
        .bind(&p.avatar)
        .bind(customer.password_hash())
        .bind(customer.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| email_conflict(e, &p.email, "update customer"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::CustomerNotFound, customer.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, DomainError> {
        let query = format!("SELECT {}, social_id FROM customers WHERE id = $1", PROFILE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch customer"))?;
        row.as_ref().map(row_to_customer).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        self.find_one("email", &email.trim().to_lowercase()).await
    }

    async fn find_by_social_id(&self, social_id: &str) -> Result<Option<Customer>, DomainError> {
        self.find_one("social_id", social_id).await
    }

    async fn list(&self) -> Result<Vec<Customer>, DomainError> {
        let query = format!(
            "SELECT {}, social_id FROM customers ORDER BY created_at",
            PROFILE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list customers"))?;
        rows.iter().map(row_to_customer).collect()
    }

    async fn delete(&self, id: &CustomerId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete customer"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::CustomerNotFound, id));
        }
        Ok(())
    }
}

/// PostgreSQL implementation of CartRepository.
#[derive(Clone)]
pub struct PostgresCartRepository {
    pool: PgPool,
}

impl PostgresCartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartRepository for PostgresCartRepository {
    async fn save(&self, item: &CartItem) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO cart_items (id, customer_id, product_id, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                quantity = EXCLUDED.quantity,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.customer_id().as_uuid())
        .bind(item.product_id().as_uuid())
        .bind(i64::from(item.quantity()))
        .bind(item.created_at().as_datetime())
        .bind(item.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("save cart item"))?;

        Ok(())
    }

    async fn find_item(
        &self,
        customer_id: &CustomerId,
        item_id: &CartItemId,
    ) -> Result<Option<CartItem>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, product_id, quantity, created_at, updated_at
            FROM cart_items WHERE id = $1 AND customer_id = $2
            "#,
        )
        .bind(item_id.as_uuid())
        .bind(customer_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("fetch cart item"))?;
        row.as_ref().map(row_to_cart_item).transpose()
    }

    async fn add(&self, item: &CartItem) -> Result<CartItem, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO cart_items (id, customer_id, product_id, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (customer_id, product_id) DO UPDATE SET
                quantity = cart_items.quantity + EXCLUDED.quantity,
                updated_at = EXCLUDED.updated_at
            RETURNING id, customer_id, product_id, quantity, created_at, updated_at
            "#,
        )
        .bind(item.id().as_uuid())
        .bind(item.customer_id().as_uuid())
        .bind(item.product_id().as_uuid())
        .bind(i64::from(item.quantity()))
        .bind(item.created_at().as_datetime())
        .bind(item.updated_at().as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("add cart item"))?;
        row_to_cart_item(&row)
    }

    async fn list_for_customer(&self, customer_id: &CustomerId) -> Result<Vec<CartItem>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, product_id, quantity, created_at, updated_at
            FROM cart_items WHERE customer_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("list cart items"))?;
        rows.iter().map(row_to_cart_item).collect()
    }

    async fn delete(&self, customer_id: &CustomerId, item_id: &CartItemId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND customer_id = $2")
            .bind(item_id.as_uuid())
            .bind(customer_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete cart item"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::CartItemNotFound, item_id));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn email_conflict(err: sqlx::Error, email: &str, action: &'static str) -> DomainError {
    if is_unique_violation(&err) {
        return DomainError::new(ErrorCode::EmailTaken, email).with_detail("field", "email");
    }
    db_error(action)(err)
}

fn row_to_profile(row: &PgRow) -> Result<AccountProfile, DomainError> {
    Ok(AccountProfile {
        email: column(row, "email")?,
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
        user_name: column(row, "user_name")?,
        phone: column(row, "phone")?,
        avatar: column(row, "avatar")?,
    })
}

fn row_to_admin(row: &PgRow) -> Result<Admin, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    Ok(Admin::reconstitute(
        AdminId::from_uuid(id),
        row_to_profile(row)?,
        column(row, "password_hash")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}

fn row_to_customer(row: &PgRow) -> Result<Customer, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    Ok(Customer::reconstitute(
        CustomerId::from_uuid(id),
        column(row, "social_id")?,
        row_to_profile(row)?,
        column(row, "password_hash")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}

fn row_to_cart_item(row: &PgRow) -> Result<CartItem, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let customer_id: uuid::Uuid = column(row, "customer_id")?;
    let product_id: uuid::Uuid = column(row, "product_id")?;
    Ok(CartItem::reconstitute(
        CartItemId::from_uuid(id),
        CustomerId::from_uuid(customer_id),
        ProductId::from_uuid(product_id),
        count(row, "quantity")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}
