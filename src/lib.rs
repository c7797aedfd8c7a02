//! Dynasty Urban Style - back office and storefront API for a clothing retailer.
//!
//! Admins run the catalog, staff, attendance and sales ledger; customers
//! browse products and keep a cart. Every guarded operation passes through
//! a role-based authorization gate (`application::authorization`) backed by
//! a static rule table (`domain::authorization`).

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
