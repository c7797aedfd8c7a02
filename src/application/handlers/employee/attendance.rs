//! Clock-in, clock-out and attendance lookups.

use std::sync::Arc;

use crate::application::authorization::AuthorizationGate;
use crate::application::operations::{CLOCK_IN, CLOCK_OUT, GET_ATTENDANCE, LIST_ATTENDANCE};
use crate::domain::authorization::{SubjectRef, SubjectType};
use crate::domain::foundation::{AttendanceId, EmployeeId, Principal, Timestamp};
use crate::domain::staff::{Attendance, EmployeeError};
use crate::ports::{AttendanceRepository, EmployeeRepository};

#[derive(Debug, Clone)]
pub struct ClockInCommand {
    pub employee_id: EmployeeId,
    /// Defaults to now.
    pub start_time: Option<Timestamp>,
}

#[derive(Debug, Clone)]
pub struct ClockOutCommand {
    pub employee_id: EmployeeId,
    pub attendance_id: AttendanceId,
    /// Defaults to now.
    pub close_time: Option<Timestamp>,
}

pub struct AttendanceHandler {
    employees: Arc<dyn EmployeeRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    gate: AuthorizationGate,
}

impl AttendanceHandler {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        attendance: Arc<dyn AttendanceRepository>,
    ) -> Self {
        Self {
            employees,
            attendance,
            gate: AuthorizationGate::new(),
        }
    }

    /// Opens a shift. An employee has at most one open shift.
    pub async fn clock_in(
        &self,
        cmd: ClockInCommand,
        principal: Option<&Principal>,
    ) -> Result<Attendance, EmployeeError> {
        self.gate.authorize(principal, &CLOCK_IN, None)?;

        if !self.employees.exists(&cmd.employee_id).await? {
            return Err(EmployeeError::not_found(cmd.employee_id));
        }
        let shifts = self.attendance.list_for_employee(&cmd.employee_id).await?;
        if let Some(open) = shifts.iter().find(|s| s.is_open()) {
            return Err(EmployeeError::invalid_state(format!(
                "employee {} is already clocked in ({})",
                cmd.employee_id,
                open.id()
            )));
        }

        let shift = Attendance::clock_in(cmd.employee_id, cmd.start_time.unwrap_or_else(Timestamp::now));
        self.attendance.save(&shift).await?;

        tracing::info!(employee_id = %cmd.employee_id, attendance_id = %shift.id(), "Clocked in");
        Ok(shift)
    }

    /// Closes an open shift of the given employee.
    pub async fn clock_out(
        &self,
        cmd: ClockOutCommand,
        principal: Option<&Principal>,
    ) -> Result<Attendance, EmployeeError> {
        let target = SubjectRef::instance(SubjectType::Attendance, cmd.attendance_id);
        self.gate.authorize(principal, &CLOCK_OUT, Some(&target))?;

        let mut shift = self
            .attendance
            .find_by_id(&cmd.attendance_id)
            .await?
            .filter(|s| s.employee_id() == cmd.employee_id)
            .ok_or_else(|| EmployeeError::attendance_not_found(cmd.attendance_id))?;

        shift.clock_out(cmd.close_time.unwrap_or_else(Timestamp::now))?;
        self.attendance.update(&shift).await?;

        tracing::info!(
            employee_id = %cmd.employee_id,
            attendance_id = %shift.id(),
            minutes = shift.worked_minutes().unwrap_or_default(),
            "Clocked out"
        );
        Ok(shift)
    }

    /// All shifts, or one employee's when `employee_id` is given.
    pub async fn list(
        &self,
        employee_id: Option<EmployeeId>,
        principal: Option<&Principal>,
    ) -> Result<Vec<Attendance>, EmployeeError> {
        self.gate.authorize(principal, &LIST_ATTENDANCE, None)?;
        match employee_id {
            Some(id) => Ok(self.attendance.list_for_employee(&id).await?),
            None => Ok(self.attendance.list().await?),
        }
    }

    pub async fn get(
        &self,
        id: AttendanceId,
        principal: Option<&Principal>,
    ) -> Result<Attendance, EmployeeError> {
        let target = SubjectRef::instance(SubjectType::Attendance, id);
        self.gate.authorize(principal, &GET_ATTENDANCE, Some(&target))?;

        self.attendance
            .find_by_id(&id)
            .await?
            .ok_or_else(|| EmployeeError::attendance_not_found(id))
    }
}
