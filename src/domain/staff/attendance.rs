//! Attendance records: one clock-in/clock-out pair per shift.

use crate::domain::authorization::{Subject, SubjectType};
use crate::domain::foundation::{AttendanceId, EmployeeId, Timestamp};

use super::EmployeeError;

/// One shift of an employee. Open until `close_time` is set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendance {
    id: AttendanceId,
    employee_id: EmployeeId,
    start_time: Timestamp,
    close_time: Option<Timestamp>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Attendance {
    /// Opens a shift at `start_time`.
    pub fn clock_in(employee_id: EmployeeId, start_time: Timestamp) -> Self {
        let now = Timestamp::now();
        Self {
            id: AttendanceId::new(),
            employee_id,
            start_time,
            close_time: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn reconstitute(
        id: AttendanceId,
        employee_id: EmployeeId,
        start_time: Timestamp,
        close_time: Option<Timestamp>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            employee_id,
            start_time,
            close_time,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> AttendanceId {
        self.id
    }

    pub fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    pub fn start_time(&self) -> &Timestamp {
        &self.start_time
    }

    pub fn close_time(&self) -> Option<&Timestamp> {
        self.close_time.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn is_open(&self) -> bool {
        self.close_time.is_none()
    }

    /// Closes the shift.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the shift is already closed
    /// - `ValidationFailed` if `close_time` precedes the start
    pub fn clock_out(&mut self, close_time: Timestamp) -> Result<(), EmployeeError> {
        if !self.is_open() {
            return Err(EmployeeError::invalid_state(format!(
                "attendance {} is already closed",
                self.id
            )));
        }
        if close_time.is_before(&self.start_time) {
            return Err(EmployeeError::validation(
                "close_time",
                "close time cannot precede start time",
            ));
        }
        self.close_time = Some(close_time);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Worked time in whole minutes, once closed.
    pub fn worked_minutes(&self) -> Option<i64> {
        self.close_time
            .map(|close| close.duration_since(&self.start_time).num_minutes())
    }
}

impl Subject for Attendance {
    const SUBJECT_TYPE: SubjectType = SubjectType::Attendance;

    fn subject_id(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_out_closes_an_open_shift() {
        let start = Timestamp::now();
        let mut shift = Attendance::clock_in(EmployeeId::new(), start);
        assert!(shift.is_open());

        shift.clock_out(start.add_seconds(8 * 3600)).unwrap();
        assert!(!shift.is_open());
        assert_eq!(shift.worked_minutes(), Some(480));
    }

    #[test]
    fn clocking_out_twice_is_invalid() {
        let start = Timestamp::now();
        let mut shift = Attendance::clock_in(EmployeeId::new(), start);
        shift.clock_out(start.add_seconds(60)).unwrap();
        let err = shift.clock_out(start.add_seconds(120)).unwrap_err();
        assert!(matches!(err, EmployeeError::InvalidState(_)));
    }

    #[test]
    fn close_before_start_is_rejected() {
        let start = Timestamp::now();
        let mut shift = Attendance::clock_in(EmployeeId::new(), start);
        let err = shift.clock_out(start.add_seconds(-60)).unwrap_err();
        assert!(matches!(err, EmployeeError::ValidationFailed { .. }));
        assert!(shift.is_open());
    }
}
