//! Product catalog handlers.

mod create_product;
mod delete_product;
mod product_images;
mod product_queries;
mod update_product;

pub use create_product::{CreateProductCommand, CreateProductHandler};
pub use delete_product::{DeleteProductCommand, DeleteProductHandler};
pub use product_images::{DeleteProductImageCommand, ProductImageHandler, UploadProductImageCommand};
pub use product_queries::ProductQueries;
pub use update_product::{UpdateProductCommand, UpdateProductHandler};
