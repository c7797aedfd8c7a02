//! Sales ledger handlers.

mod record_sale;
mod sale_queries;

pub use record_sale::{DeleteSaleCommand, RecordSaleCommand, SaleCommands, UpdateSaleCommand};
pub use sale_queries::SaleQueries;
