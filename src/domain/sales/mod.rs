//! Sales ledger.

mod errors;
mod sale;

pub use errors::SaleError;
pub use sale::{Sale, SaleChanges};
