//! Employee avatar upload and removal.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::handlers::support::{discard_image, store_image, ImageUpload};
use crate::application::operations::{DELETE_EMPLOYEE_AVATAR, UPDATE_EMPLOYEE_AVATAR};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{EmployeeId, Principal};
use crate::domain::staff::{Employee, EmployeeError};
use crate::ports::{BlobStorage, EmployeeRepository, EMPLOYEE_AVATAR_FOLDER};

#[derive(Debug, Clone)]
pub struct UpdateEmployeeAvatarCommand {
    pub employee_id: EmployeeId,
    pub image: ImageUpload,
}

#[derive(Debug, Clone)]
pub struct DeleteEmployeeAvatarCommand {
    pub employee_id: EmployeeId,
}

pub struct EmployeeAvatarHandler {
    employees: Arc<dyn EmployeeRepository>,
    storage: Arc<dyn BlobStorage>,
    gate: AuthorizationGate,
}

impl EmployeeAvatarHandler {
    pub fn new(employees: Arc<dyn EmployeeRepository>, storage: Arc<dyn BlobStorage>) -> Self {
        Self {
            employees,
            storage,
            gate: AuthorizationGate::new(),
        }
    }

    pub async fn update(
        &self,
        cmd: UpdateEmployeeAvatarCommand,
        principal: Option<&Principal>,
    ) -> Result<Employee, EmployeeError> {
        let target = SubjectRef::instance(SubjectType::Employee, cmd.employee_id);
        self.gate
            .authorize(principal, &UPDATE_EMPLOYEE_AVATAR, Some(&target))?;

        let mut employee = self.load(cmd.employee_id).await?;
        let stored = store_image(self.storage.as_ref(), EMPLOYEE_AVATAR_FOLDER, cmd.image).await?;
        let previous = employee.avatar().to_string();
        employee.set_avatar(stored.url);
        self.employees.update(&employee).await?;

        discard_image(self.storage.as_ref(), EMPLOYEE_AVATAR_FOLDER, &previous).await?;
        Ok(employee)
    }

    pub async fn delete(
        &self,
        cmd: DeleteEmployeeAvatarCommand,
        principal: Option<&Principal>,
    ) -> Result<Employee, EmployeeError> {
        let target = SubjectRef::instance(SubjectType::Employee, cmd.employee_id);
        self.gate
            .authorize(principal, &DELETE_EMPLOYEE_AVATAR, Some(&target))?;

        let mut employee = self.load(cmd.employee_id).await?;
        if employee.has_default_avatar() {
            return Ok(employee);
        }
        discard_image(self.storage.as_ref(), EMPLOYEE_AVATAR_FOLDER, employee.avatar()).await?;
        employee.reset_avatar();
        self.employees.update(&employee).await?;
        Ok(employee)
    }

    async fn load(&self, id: EmployeeId) -> Result<Employee, EmployeeError> {
        self.employees
            .find_by_id(&id)
            .await?
            .ok_or_else(|| EmployeeError::not_found(id))
    }
}
