//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresAdminRepository`, `PostgresCustomerRepository`, `PostgresCartRepository`
//! - `PostgresProductRepository`
//! - `PostgresEmployeeRepository`, `PostgresAttendanceRepository`
//! - `PostgresSaleRepository`
//!
//! The schema is managed outside this crate. Expected tables:
//!
//! ```sql
//! CREATE TABLE admins (
//!     id UUID PRIMARY KEY, email TEXT NOT NULL UNIQUE, first_name TEXT NOT NULL,
//!     last_name TEXT NOT NULL, user_name TEXT NOT NULL, phone TEXT, avatar TEXT NOT NULL,
//!     password_hash TEXT NOT NULL, created_at TIMESTAMPTZ NOT NULL, updated_at TIMESTAMPTZ NOT NULL
//! );
//! CREATE TABLE customers (
//!     -- same columns as admins, with password_hash nullable, plus:
//!     social_id TEXT UNIQUE
//! );
//! CREATE TABLE cart_items (
//!     id UUID PRIMARY KEY, customer_id UUID NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
//!     product_id UUID NOT NULL, quantity BIGINT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL, updated_at TIMESTAMPTZ NOT NULL,
//!     UNIQUE (customer_id, product_id)
//! );
//! CREATE TABLE products (
//!     id UUID PRIMARY KEY, name TEXT NOT NULL, description TEXT NOT NULL,
//!     price_amount DOUBLE PRECISION NOT NULL, price_currency TEXT NOT NULL, depo TEXT NOT NULL,
//!     category TEXT NOT NULL, brand TEXT, num_in_stock BIGINT NOT NULL, colors TEXT[] NOT NULL,
//!     sizes TEXT[] NOT NULL, images TEXT[] NOT NULL, rating REAL NOT NULL,
//!     num_reviews BIGINT NOT NULL, created_at TIMESTAMPTZ NOT NULL, updated_at TIMESTAMPTZ NOT NULL
//! );
//! CREATE TABLE employees (
//!     id UUID PRIMARY KEY, email TEXT NOT NULL UNIQUE, first_name TEXT NOT NULL,
//!     last_name TEXT NOT NULL, designation TEXT NOT NULL, phone_number TEXT NOT NULL,
//!     avatar TEXT NOT NULL, created_at TIMESTAMPTZ NOT NULL, updated_at TIMESTAMPTZ NOT NULL
//! );
//! CREATE TABLE attendance (
//!     id UUID PRIMARY KEY, employee_id UUID NOT NULL, start_time TIMESTAMPTZ NOT NULL,
//!     close_time TIMESTAMPTZ, created_at TIMESTAMPTZ NOT NULL, updated_at TIMESTAMPTZ NOT NULL
//! );
//! -- At most one open shift per employee.
//! CREATE UNIQUE INDEX attendance_one_open_shift ON attendance (employee_id) WHERE close_time IS NULL;
//! CREATE TABLE sales (
//!     id UUID PRIMARY KEY, product_id UUID NOT NULL, employee_id UUID NOT NULL,
//!     currency TEXT NOT NULL, amount DOUBLE PRECISION NOT NULL, quantity BIGINT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL, updated_at TIMESTAMPTZ NOT NULL
//! );
//! ```

mod account_repository;
mod product_repository;
mod sale_repository;
mod staff_repository;
mod support;

pub use account_repository::{
    PostgresAdminRepository, PostgresCartRepository, PostgresCustomerRepository,
};
pub use product_repository::PostgresProductRepository;
pub use sale_repository::PostgresSaleRepository;
pub use staff_repository::{PostgresAttendanceRepository, PostgresEmployeeRepository};
