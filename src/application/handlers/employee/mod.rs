//! Employee and attendance handlers.

mod attendance;
mod employee_avatar;
mod employee_queries;
mod manage_employee;

pub use attendance::{AttendanceHandler, ClockInCommand, ClockOutCommand};
pub use employee_avatar::{
    DeleteEmployeeAvatarCommand, EmployeeAvatarHandler, UpdateEmployeeAvatarCommand,
};
pub use employee_queries::EmployeeQueries;
pub use manage_employee::{
    CreateEmployeeCommand, CreateEmployeeHandler, DeleteEmployeeCommand, DeleteEmployeeHandler,
    UpdateEmployeeCommand, UpdateEmployeeHandler,
};
