//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, principal, errors)
//! - `authorization` - Rule table, abilities and policy handlers
//! - `account` - Admins, customers and carts
//! - `catalog` - Products and prices
//! - `staff` - Employees and attendance
//! - `sales` - Sales ledger

pub mod account;
pub mod authorization;
pub mod catalog;
pub mod foundation;
pub mod sales;
pub mod staff;
