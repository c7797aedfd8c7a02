//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `AdminRepository`, `CustomerRepository`, `CartRepository`
//! - `ProductRepository`
//! - `EmployeeRepository`, `AttendanceRepository`
//! - `SaleRepository`
//!
//! ## Credentials
//!
//! - `PasswordHasher` - one-way password hashing
//! - `TokenIssuer` / `SessionValidator` - access token round trip
//!
//! ## Files
//!
//! - `BlobStorage` - avatars and product images

mod admin_repository;
mod blob_storage;
mod customer_repository;
mod employee_repository;
mod password_hasher;
mod product_repository;
mod sale_repository;
mod session_validator;
mod token_issuer;

pub use admin_repository::AdminRepository;
pub use blob_storage::{
    image_extension, BlobStorage, BlobUpload, StorageError, StoredBlob, ADMIN_AVATAR_FOLDER,
    CUSTOMER_AVATAR_FOLDER, EMPLOYEE_AVATAR_FOLDER, PRODUCT_IMAGE_FOLDER,
};
pub use customer_repository::{CartRepository, CustomerRepository};
pub use employee_repository::{AttendanceRepository, EmployeeRepository};
pub use password_hasher::PasswordHasher;
pub use product_repository::ProductRepository;
pub use sale_repository::SaleRepository;
pub use session_validator::SessionValidator;
pub use token_issuer::{IssuedToken, TokenIssuer};
