use std::{future::Future, sync::Arc, time::Duration};

use actix_web::rt::time::timeout;
use tracing::error;

use super::{MigrationReport, ScheduleStore, StoreError, TenantScope};
use crate::model::{
    attendance::AttendanceEntry,
    employee::{Employee, NewEmployee},
    month::MonthWindow,
    supervisor::Supervisor,
};

/// Call boundary toward the store: every call is bounded by a timeout and
/// every failure is logged here, so callers only decide which sentinel to
/// fall back to.
#[derive(Clone)]
pub struct Remote {
    store: Arc<dyn ScheduleStore>,
    limit: Duration,
}

impl Remote {
    pub fn new(store: Arc<dyn ScheduleStore>, limit: Duration) -> Self {
        Self { store, limit }
    }

    async fn call<T, F>(&self, operation: &'static str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        let result = match timeout(self.limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout { operation }),
        };

        if let Err(e) = &result {
            match e {
                StoreError::Credentials => {}
                _ => error!(error = %e, operation, "Store call failed"),
            }
        }
        result
    }

    pub async fn list_employees(&self, tenant: TenantScope) -> Result<Vec<Employee>, StoreError> {
        self.call("list employees", self.store.list_employees(tenant))
            .await
    }

    pub async fn create_employee(
        &self,
        employee: &NewEmployee,
        tenant: TenantScope,
    ) -> Result<Employee, StoreError> {
        self.call("create employee", self.store.create_employee(employee, tenant))
            .await
    }

    pub async fn delete_employee(&self, id: u64, tenant: TenantScope) -> Result<(), StoreError> {
        self.call("delete employee", self.store.delete_employee(id, tenant))
            .await
    }

    pub async fn list_attendance(
        &self,
        window: MonthWindow,
        tenant: TenantScope,
    ) -> Result<Vec<AttendanceEntry>, StoreError> {
        self.call("list attendance", self.store.list_attendance(window, tenant))
            .await
    }

    pub async fn upsert_attendance(
        &self,
        entry: &AttendanceEntry,
        tenant: TenantScope,
    ) -> Result<(), StoreError> {
        self.call("upsert attendance", self.store.upsert_attendance(entry, tenant))
            .await
    }

    pub async fn check_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Supervisor, StoreError> {
        self.call("check credentials", self.store.check_credentials(email, password))
            .await
    }

    pub async fn create_supervisor(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<u64, StoreError> {
        self.call(
            "create supervisor",
            self.store.create_supervisor(email, password, name),
        )
        .await
    }

    pub async fn migrate_unowned(&self, supervisor_id: u64) -> Result<MigrationReport, StoreError> {
        self.call("migrate unowned data", self.store.migrate_unowned(supervisor_id))
            .await
    }
}
