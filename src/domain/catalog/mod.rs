//! Product catalog.

mod errors;
mod price;
mod product;

pub use errors::ProductError;
pub use price::Price;
pub use product::{Product, ProductChanges, ProductDetails};

pub(crate) use price::{normalize_currency, validate_amount};

#[cfg(test)]
pub(crate) use product::tests::details as sample_details;
