//! HTTP adapter for the sales ledger.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::sale_routes;
