//! Employee creation, updates and removal.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::support::discard_image;
use crate::application::operations::{CREATE_EMPLOYEE, DELETE_EMPLOYEE, UPDATE_EMPLOYEE};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{EmployeeId, Principal};
use crate::domain::staff::{Employee, EmployeeChanges, EmployeeDetails, EmployeeError};
use crate::ports::{BlobStorage, EmployeeRepository, EMPLOYEE_AVATAR_FOLDER};

#[derive(Debug, Clone)]
pub struct CreateEmployeeCommand {
    pub details: EmployeeDetails,
    /// Existing avatar URL; the default avatar when absent.
    pub avatar: Option<String>,
}

pub struct CreateEmployeeHandler {
    employees: Arc<dyn EmployeeRepository>,
    gate: AuthorizationGate,
}

impl CreateEmployeeHandler {
    pub fn new(employees: Arc<dyn EmployeeRepository>) -> Self {
        Self {
            employees,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateEmployeeCommand,
        principal: Option<&Principal>,
    ) -> Result<Employee, EmployeeError> {
        self.gate.authorize(principal, &CREATE_EMPLOYEE, None)?;

        let employee = Employee::new(EmployeeId::new(), cmd.details, cmd.avatar)?;
        self.employees.save(&employee).await?;

        tracing::info!(employee_id = %employee.id(), "Employee created");
        Ok(employee)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateEmployeeCommand {
    pub employee_id: EmployeeId,
    pub changes: EmployeeChanges,
}

pub struct UpdateEmployeeHandler {
    employees: Arc<dyn EmployeeRepository>,
    gate: AuthorizationGate,
}

impl UpdateEmployeeHandler {
    pub fn new(employees: Arc<dyn EmployeeRepository>) -> Self {
        Self {
            employees,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateEmployeeCommand,
        principal: Option<&Principal>,
    ) -> Result<Employee, EmployeeError> {
        let target = SubjectRef::instance(SubjectType::Employee, cmd.employee_id);
        self.gate.authorize(principal, &UPDATE_EMPLOYEE, Some(&target))?;

        let mut employee = self
            .employees
            .find_by_id(&cmd.employee_id)
            .await?
            .ok_or_else(|| EmployeeError::not_found(cmd.employee_id))?;
        employee.apply(cmd.changes)?;
        self.employees.update(&employee).await?;
        Ok(employee)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteEmployeeCommand {
    pub employee_id: EmployeeId,
}

pub struct DeleteEmployeeHandler {
    employees: Arc<dyn EmployeeRepository>,
    storage: Arc<dyn BlobStorage>,
    gate: AuthorizationGate,
}

impl DeleteEmployeeHandler {
    pub fn new(employees: Arc<dyn EmployeeRepository>, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            employees,
            storage,
            gate: AuthorizationGate::new(),
        }
    }

    /// Removes the employee and their avatar. Attendance history is kept.
    pub async fn handle(
        &self,
        cmd: DeleteEmployeeCommand,
        principal: Option<&Principal>,
    ) -> Result<(), EmployeeError> {
        let target = SubjectRef::instance(SubjectType::Employee, cmd.employee_id);
        self.gate.authorize(principal, &DELETE_EMPLOYEE, Some(&target))?;

        let employee = self
            .employees
            .find_by_id(&cmd.employee_id)
            .await?
            .ok_or_else(|| EmployeeError::not_found(cmd.employee_id))?;

        self.employees.delete(&employee.id()).await?;
        discard_image(self.storage.as_ref(), EMPLOYEE_AVATAR_FOLDER, employee.avatar()).await?;

        tracing::info!(employee_id = %employee.id(), "Employee deleted");
        Ok(())
    }
}
