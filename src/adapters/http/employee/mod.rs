//! HTTP adapter for employees and their attendance.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::{attendance_routes, employee_routes};
