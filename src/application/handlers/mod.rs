//! Command and query handlers, one module per domain.
//!
//! Every guarded handler runs the authorization gate first, with the
//! principal resolved by the HTTP layer (`None` when the request carried no
//! valid token), and only then touches repositories or storage.

pub mod admin;
pub mod customer;
pub mod employee;
pub mod product;
pub mod sale;

mod support;

pub use support::ImageUpload;

#[cfg(test)]
mod test_support;
