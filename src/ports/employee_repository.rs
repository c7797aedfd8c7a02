//! Employee and attendance repository ports.

use async_trait::async_trait;

use crate::domain::foundation::{AttendanceId, DomainError, EmployeeId};
use crate::domain::staff::{Attendance, Employee};

/// Repository port for employees.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn save(&self, employee: &Employee) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `EmployeeNotFound` if the employee doesn't exist
    async fn update(&self, employee: &Employee) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError>;

    /// All employees, newest first.
    async fn list(&self) -> Result<Vec<Employee>, DomainError>;

    async fn exists(&self, id: &EmployeeId) -> Result<bool, DomainError>;

    /// Deletes the employee and their attendance records.
    ///
    /// # Errors
    ///
    /// - `EmployeeNotFound` if the employee doesn't exist
    async fn delete(&self, id: &EmployeeId) -> Result<(), DomainError>;
}

/// Repository port for attendance records.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Insert a new shift.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the shift is open and the employee
    ///   already has another open shift
    async fn save(&self, attendance: &Attendance) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `AttendanceNotFound` if the record doesn't exist
    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &AttendanceId) -> Result<Option<Attendance>, DomainError>;

    /// Every attendance record, most recent shift first.
    async fn list(&self) -> Result<Vec<Attendance>, DomainError>;

    async fn list_for_employee(&self, employee_id: &EmployeeId) -> Result<Vec<Attendance>, DomainError>;
}
