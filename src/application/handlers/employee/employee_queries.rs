//! Employee read operations.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::operations::{GET_EMPLOYEE, LIST_EMPLOYEES};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{EmployeeId, Principal};
use crate::domain::staff::{Employee, EmployeeError};
use crate::ports::EmployeeRepository;

pub struct EmployeeQueries {
    employees: Arc<dyn EmployeeRepository>,
    gate: AuthorizationGate,
}

impl EmployeeQueries {
    pub fn new(employees: Arc<dyn EmployeeRepository>) -> Self {
        Self {
            employees,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn list(&self, principal: Option<&Principal>) -> Result<Vec<Employee>, EmployeeError> {
        self.gate.authorize(principal, &LIST_EMPLOYEES, None)?;
        Ok(self.employees.list().await?)
    }

    pub async fn get(
        &self,
        id: EmployeeId,
        principal: Option<&Principal>,
    ) -> Result<Employee, EmployeeError> {
        let target = SubjectRef::instance(SubjectType::Employee, id);
        self.gate.authorize(principal, &GET_EMPLOYEE, Some(&target))?;

        self.employees
            .find_by_id(&id)
            .await?
            .ok_or_else(|| EmployeeError::not_found(id))
    }
}
