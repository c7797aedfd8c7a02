//! Employee entity.

use crate::domain::account::{normalize_email, DEFAULT_AVATAR_URL};
use crate::domain::authorization::{Subject, SubjectType};
use crate::domain::foundation::{EmployeeId, Timestamp, ValidationError};

/// Editable employee attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub designation: String,
    pub phone_number: String,
}

impl EmployeeDetails {
    fn normalized(mut self) -> Result<Self, ValidationError> {
        self.email = normalize_email(&self.email)?;
        for (field, value) in [
            ("first_name", &mut self.first_name),
            ("last_name", &mut self.last_name),
            ("designation", &mut self.designation),
            ("phone_number", &mut self.phone_number),
        ] {
            *value = value.trim().to_string();
            if value.is_empty() {
                return Err(ValidationError::empty_field(field));
            }
        }
        Ok(self)
    }
}

/// Partial employee update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub designation: Option<String>,
    pub phone_number: Option<String>,
}

/// A member of staff. Attendance records are stored separately and
/// reference the employee by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    details: EmployeeDetails,
    avatar: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Employee {
    pub fn new(
        id: EmployeeId,
        details: EmployeeDetails,
        avatar: Option<String>,
    ) -> Result<Self, ValidationError> {
        let details = details.normalized()?;
        let now = Timestamp::now();
        Ok(Self {
            id,
            details,
            avatar: avatar
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AVATAR_URL.to_string()),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn reconstitute(
        id: EmployeeId,
        details: EmployeeDetails,
        avatar: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            details,
            avatar,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn details(&self) -> &EmployeeDetails {
        &self.details
    }

    pub fn avatar(&self) -> &str {
        &self.avatar
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.details.first_name, self.details.last_name)
    }

    pub fn apply(&mut self, changes: EmployeeChanges) -> Result<(), ValidationError> {
        let mut details = self.details.clone();
        if let Some(email) = changes.email {
            details.email = email;
        }
        if let Some(first) = changes.first_name {
            details.first_name = first;
        }
        if let Some(last) = changes.last_name {
            details.last_name = last;
        }
        if let Some(designation) = changes.designation {
            details.designation = designation;
        }
        if let Some(phone) = changes.phone_number {
            details.phone_number = phone;
        }
        self.details = details.normalized()?;
        self.touch();
        Ok(())
    }

    pub fn set_avatar(&mut self, url: String) {
        self.avatar = url;
        self.touch();
    }

    pub fn reset_avatar(&mut self) {
        self.set_avatar(DEFAULT_AVATAR_URL.to_string());
    }

    pub fn has_default_avatar(&self) -> bool {
        self.avatar == DEFAULT_AVATAR_URL
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

impl Subject for Employee {
    const SUBJECT_TYPE: SubjectType = SubjectType::Employee;

    fn subject_id(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn details() -> EmployeeDetails {
        EmployeeDetails {
            email: "Esi@Dynasty.io".into(),
            first_name: "Esi".into(),
            last_name: "Boateng".into(),
            designation: "Sales Associate".into(),
            phone_number: "+233200000000".into(),
        }
    }

    #[test]
    fn new_employee_normalizes_and_defaults_avatar() {
        let e = Employee::new(EmployeeId::new(), details(), None).unwrap();
        assert_eq!(e.details().email, "esi@dynasty.io");
        assert!(e.has_default_avatar());
        assert_eq!(e.full_name(), "Esi Boateng");
    }

    #[test]
    fn blank_designation_is_rejected() {
        let mut d = details();
        d.designation = " ".into();
        assert!(Employee::new(EmployeeId::new(), d, None).is_err());
    }

    #[test]
    fn invalid_update_is_not_applied() {
        let mut e = Employee::new(EmployeeId::new(), details(), None).unwrap();
        let result = e.apply(EmployeeChanges {
            email: Some("broken".into()),
            designation: Some("Manager".into()),
            ..Default::default()
        });
        assert!(result.is_err());
        assert_eq!(e.details().designation, "Sales Associate");
    }
}
