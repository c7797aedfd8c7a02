//! In-memory repository adapters.
//!
//! Back the ports with `RwLock<HashMap>` tables. Used by the test suites and
//! for running the server without a database (`database.url` unset).
//! Constraint behavior mirrors the Postgres schema: unique emails, not-found
//! on updating or deleting missing rows.

mod account_store;
mod product_store;
mod sale_store;
mod staff_store;

pub use account_store::{InMemoryAdminRepository, InMemoryCartRepository, InMemoryCustomerRepository};
pub use product_store::InMemoryProductRepository;
pub use sale_store::InMemorySaleRepository;
pub use staff_store::{InMemoryAttendanceRepository, InMemoryEmployeeRepository};
