//! Request and response bodies for employee and attendance endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmployeeId, Timestamp};
use crate::domain::staff::{Attendance, Employee, EmployeeChanges, EmployeeDetails};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEmployeeRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub designation: String,
    pub phone_number: String,
    /// Avatar URL; the default avatar when absent.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl CreateEmployeeRequest {
    pub fn into_parts(self) -> (EmployeeDetails, Option<String>) {
        let details = EmployeeDetails {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            designation: self.designation,
            phone_number: self.phone_number,
        };
        (details, self.avatar)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEmployeeRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

impl From<UpdateEmployeeRequest> for EmployeeChanges {
    fn from(req: UpdateEmployeeRequest) -> Self {
        Self {
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            designation: req.designation,
            phone_number: req.phone_number,
        }
    }
}

/// Optional body of clock-in and clock-out; the server clock when absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClockRequest {
    #[serde(default)]
    pub at: Option<Timestamp>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AttendanceFilter {
    #[serde(default)]
    pub employee_id: Option<EmployeeId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub designation: String,
    pub phone_number: String,
    pub avatar: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Employee> for EmployeeResponse {
    fn from(employee: &Employee) -> Self {
        let d = employee.details();
        Self {
            id: employee.id().to_string(),
            email: d.email.clone(),
            first_name: d.first_name.clone(),
            last_name: d.last_name.clone(),
            designation: d.designation.clone(),
            phone_number: d.phone_number.clone(),
            avatar: employee.avatar().to_string(),
            created_at: *employee.created_at(),
            updated_at: *employee.updated_at(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceResponse {
    pub id: String,
    pub employee_id: String,
    pub start_time: Timestamp,
    pub close_time: Option<Timestamp>,
    pub worked_minutes: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Attendance> for AttendanceResponse {
    fn from(attendance: &Attendance) -> Self {
        Self {
            id: attendance.id().to_string(),
            employee_id: attendance.employee_id().to_string(),
            start_time: *attendance.start_time(),
            close_time: attendance.close_time().copied(),
            worked_minutes: attendance.worked_minutes(),
            created_at: *attendance.created_at(),
            updated_at: *attendance.updated_at(),
        }
    }
}
