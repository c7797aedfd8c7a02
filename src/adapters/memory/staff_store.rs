//! In-memory employee and attendance tables.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{AttendanceId, DomainError, EmployeeId, ErrorCode};
use crate::domain::staff::{Attendance, Employee};
use crate::ports::{AttendanceRepository, EmployeeRepository};

#[derive(Debug, Clone, Default)]
pub struct InMemoryEmployeeRepository {
    employees: Arc<RwLock<HashMap<EmployeeId, Employee>>>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn save(&self, employee: &Employee) -> Result<(), DomainError> {
        let mut employees = self.employees.write().await;
        if employees
            .values()
            .any(|e| e.id() != employee.id() && e.details().email == employee.details().email)
        {
            return Err(DomainError::new(ErrorCode::EmailTaken, &employee.details().email)
                .with_detail("field", "email"));
        }
        employees.insert(employee.id(), employee.clone());
        Ok(())
    }

    async fn update(&self, employee: &Employee) -> Result<(), DomainError> {
        let mut employees = self.employees.write().await;
        match employees.get_mut(&employee.id()) {
            Some(existing) => {
                *existing = employee.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::EmployeeNotFound,
                employee.id().to_string(),
            )),
        }
    }

    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        Ok(self.employees.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Employee>, DomainError> {
        let mut employees: Vec<Employee> = self.employees.read().await.values().cloned().collect();
        employees.sort_by_key(|e| *e.created_at().as_datetime());
        Ok(employees)
    }

    async fn exists(&self, id: &EmployeeId) -> Result<bool, DomainError> {
        Ok(self.employees.read().await.contains_key(id))
    }

    async fn delete(&self, id: &EmployeeId) -> Result<(), DomainError> {
        match self.employees.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(DomainError::new(ErrorCode::EmployeeNotFound, id.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryAttendanceRepository {
    records: Arc<RwLock<HashMap<AttendanceId, Attendance>>>,
}

impl InMemoryAttendanceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AttendanceRepository for InMemoryAttendanceRepository {
    async fn save(&self, attendance: &Attendance) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        if attendance.is_open()
            && records
                .values()
                .any(|r| r.employee_id() == attendance.employee_id() && r.is_open())
        {
            return Err(already_clocked_in(attendance));
        }
        records.insert(attendance.id(), attendance.clone());
        Ok(())
    }

    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get_mut(&attendance.id()) {
            Some(existing) => {
                *existing = attendance.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::AttendanceNotFound,
                attendance.id().to_string(),
            )),
        }
    }

    async fn find_by_id(&self, id: &AttendanceId) -> Result<Option<Attendance>, DomainError> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Attendance>, DomainError> {
        let mut records: Vec<Attendance> = self.records.read().await.values().cloned().collect();
        records.sort_by_key(|r| *r.start_time().as_datetime());
        Ok(records)
    }

    async fn list_for_employee(&self, employee_id: &EmployeeId) -> Result<Vec<Attendance>, DomainError> {
        let mut records: Vec<Attendance> = self
            .records
            .read()
            .await
            .values()
            .filter(|r| r.employee_id() == *employee_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| *r.start_time().as_datetime());
        Ok(records)
    }
}

fn already_clocked_in(attendance: &Attendance) -> DomainError {
    DomainError::new(
        ErrorCode::InvalidStateTransition,
        format!("employee {} is already clocked in", attendance.employee_id()),
    )
}
