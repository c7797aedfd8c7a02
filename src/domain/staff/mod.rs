//! Staff: employees and their attendance.

mod attendance;
mod employee;
mod errors;

pub use attendance::Attendance;
pub use employee::{Employee, EmployeeChanges, EmployeeDetails};
pub use errors::EmployeeError;

#[cfg(test)]
pub(crate) use employee::tests::details as sample_employee_details;
