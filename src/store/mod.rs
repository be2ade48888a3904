use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::model::{
    attendance::AttendanceEntry,
    employee::{Employee, NewEmployee},
    month::MonthWindow,
    supervisor::Supervisor,
};

#[cfg(test)]
pub mod memory;
pub mod mysql;
pub mod remote;

/// Owning supervisor id in multi-tenant mode, `None` for the global roster.
pub type TenantScope = Option<u64>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("{operation} timed out")]
    Timeout { operation: &'static str },
    #[error("record not found")]
    NotFound,
    #[error("invalid credentials")]
    Credentials,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("{0}")]
    Rejected(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct MigrationReport {
    #[schema(example = 12)]
    pub employees: u64,
    #[schema(example = 340)]
    pub schedules: u64,
}

/// The relational store behind the board. Every call may suspend on the
/// network; none of them retries.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Employees of the scope ordered by name.
    async fn list_employees(&self, tenant: TenantScope) -> Result<Vec<Employee>, StoreError>;

    async fn create_employee(
        &self,
        employee: &NewEmployee,
        tenant: TenantScope,
    ) -> Result<Employee, StoreError>;

    async fn delete_employee(&self, id: u64, tenant: TenantScope) -> Result<(), StoreError>;

    /// Entries dated from the first to the last day of `window`.
    async fn list_attendance(
        &self,
        window: MonthWindow,
        tenant: TenantScope,
    ) -> Result<Vec<AttendanceEntry>, StoreError>;

    /// Conflict key is (employee_id, date); the last write wins.
    async fn upsert_attendance(
        &self,
        entry: &AttendanceEntry,
        tenant: TenantScope,
    ) -> Result<(), StoreError>;

    async fn check_credentials(&self, email: &str, password: &str)
    -> Result<Supervisor, StoreError>;

    async fn create_supervisor(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<u64, StoreError>;

    /// Hands every ownerless employee and schedule row to `supervisor_id`.
    async fn migrate_unowned(&self, supervisor_id: u64) -> Result<MigrationReport, StoreError>;
}
