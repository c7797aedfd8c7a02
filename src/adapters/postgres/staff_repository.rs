//! PostgreSQL implementations of the staff ports.
//!
//! Attendance rows keep their employee id after the employee is deleted,
//! so `attendance.employee_id` carries no foreign key.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use super::support::{column, db_error, is_unique_violation, not_found, timestamp};
use crate::domain::foundation::{AttendanceId, DomainError, EmployeeId, ErrorCode, Timestamp};
use crate::domain::staff::{Attendance, Employee, EmployeeDetails};
use crate::ports::{AttendanceRepository, EmployeeRepository};

const EMPLOYEE_COLUMNS: &str =
    "id, email, first_name, last_name, designation, phone_number, avatar, created_at, updated_at";

const ATTENDANCE_COLUMNS: &str = "id, employee_id, start_time, close_time, created_at, updated_at";

#[derive(Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    async fn save(&self, employee: &Employee) -> Result<(), DomainError> {
        let d = employee.details();
        sqlx::query(
            r#"
            INSERT INTO employees (
                id, email, first_name, last_name, designation, phone_number, avatar,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(employee.id().as_uuid())
        .bind(&d.email)
        .bind(&d.first_name)
        .bind(&d.last_name)
        .bind(&d.designation)
        .bind(&d.phone_number)
        .bind(employee.avatar())
        .bind(employee.created_at().as_datetime())
        .bind(employee.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| email_conflict(e, &d.email, "insert employee"))?;

        Ok(())
    }

    async fn update(&self, employee: &Employee) -> Result<(), DomainError> {
        let d = employee.details();
        let result = sqlx::query(
            r#"
            UPDATE employees SET
                email = $2, first_name = $3, last_name = $4, designation = $5,
                phone_number = $6, avatar = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(employee.id().as_uuid())
        .bind(&d.email)
        .bind(&d.first_name)
        .bind(&d.last_name)
        .bind(&d.designation)
        .bind(&d.phone_number)
        .bind(employee.avatar())
        .bind(employee.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| email_conflict(e, &d.email, "update employee"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::EmployeeNotFound, employee.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &EmployeeId) -> Result<Option<Employee>, DomainError> {
        let query = format!("SELECT {} FROM employees WHERE id = $1", EMPLOYEE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch employee"))?;
        row.as_ref().map(row_to_employee).transpose()
    }

    async fn list(&self) -> Result<Vec<Employee>, DomainError> {
        let query = format!("SELECT {} FROM employees ORDER BY created_at", EMPLOYEE_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list employees"))?;
        rows.iter().map(row_to_employee).collect()
    }

    async fn exists(&self, id: &EmployeeId) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM employees WHERE id = $1) AS present")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("check employee"))?;
        column(&row, "present")
    }

    async fn delete(&self, id: &EmployeeId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(db_error("delete employee"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::EmployeeNotFound, id));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct PostgresAttendanceRepository {
    pool: PgPool,
}

impl PostgresAttendanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRepository for PostgresAttendanceRepository {
    async fn save(&self, attendance: &Attendance) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO attendance (id, employee_id, start_time, close_time, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(attendance.id().as_uuid())
        .bind(attendance.employee_id().as_uuid())
        .bind(attendance.start_time().as_datetime())
        .bind(attendance.close_time().map(Timestamp::as_datetime))
        .bind(attendance.created_at().as_datetime())
        .bind(attendance.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                return DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    format!("employee {} is already clocked in", attendance.employee_id()),
                );
            }
            db_error("insert attendance")(err)
        })?;

        Ok(())
    }

    async fn update(&self, attendance: &Attendance) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE attendance SET close_time = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(attendance.id().as_uuid())
        .bind(attendance.close_time().map(Timestamp::as_datetime))
        .bind(attendance.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error("update attendance"))?;

        if result.rows_affected() == 0 {
            return Err(not_found(ErrorCode::AttendanceNotFound, attendance.id()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &AttendanceId) -> Result<Option<Attendance>, DomainError> {
        let query = format!("SELECT {} FROM attendance WHERE id = $1", ATTENDANCE_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("fetch attendance"))?;
        row.as_ref().map(row_to_attendance).transpose()
    }

    async fn list(&self) -> Result<Vec<Attendance>, DomainError> {
        let query = format!(
            "SELECT {} FROM attendance ORDER BY start_time",
            ATTENDANCE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list attendance"))?;
        rows.iter().map(row_to_attendance).collect()
    }

    async fn list_for_employee(&self, employee_id: &EmployeeId) -> Result<Vec<Attendance>, DomainError> {
        let query = format!(
            "SELECT {} FROM attendance WHERE employee_id = $1 ORDER BY start_time",
            ATTENDANCE_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(employee_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("list attendance for employee"))?;
        rows.iter().map(row_to_attendance).collect()
    }
}

fn email_conflict(err: sqlx::Error, email: &str, action: &'static str) -> DomainError {
    if is_unique_violation(&err) {
        return DomainError::new(ErrorCode::EmailTaken, email).with_detail("field", "email");
    }
    db_error(action)(err)
}

fn row_to_employee(row: &PgRow) -> Result<Employee, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let details = EmployeeDetails {
        email: column(row, "email")?,
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
        designation: column(row, "designation")?,
        phone_number: column(row, "phone_number")?,
    };
    Ok(Employee::reconstitute(
        EmployeeId::from_uuid(id),
        details,
        column(row, "avatar")?,
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}

fn row_to_attendance(row: &PgRow) -> Result<Attendance, DomainError> {
    let id: uuid::Uuid = column(row, "id")?;
    let employee_id: uuid::Uuid = column(row, "employee_id")?;
    let close_time: Option<chrono::DateTime<chrono::Utc>> = column(row, "close_time")?;
    Ok(Attendance::reconstitute(
        AttendanceId::from_uuid(id),
        EmployeeId::from_uuid(employee_id),
        timestamp(row, "start_time")?,
        close_time.map(Timestamp::from_datetime),
        timestamp(row, "created_at")?,
        timestamp(row, "updated_at")?,
    ))
}
