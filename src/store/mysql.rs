use async_trait::async_trait;
use sqlx::MySqlPool;
use tracing::{debug, info};

use super::{MigrationReport, ScheduleStore, StoreError, TenantScope};
use crate::{
    auth::password::{hash_password, verify_password},
    model::{
        attendance::AttendanceEntry,
        employee::{Employee, NewEmployee},
        month::MonthWindow,
        supervisor::Supervisor,
    },
};

const EMPLOYEE_COLUMNS: &str = "id, name, shift, sector, role, supervisor_id";

#[derive(sqlx::FromRow)]
struct SupervisorRow {
    id: u64,
    email: String,
    name: String,
    password_hash: String,
}

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn is_duplicate(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        return db_err.code().as_deref() == Some("23000");
    }
    false
}

#[async_trait]
impl ScheduleStore for MySqlStore {
    async fn list_employees(&self, tenant: TenantScope) -> Result<Vec<Employee>, StoreError> {
        let employees = match tenant {
            Some(supervisor_id) => {
                let sql = format!(
                    "SELECT {} FROM employees WHERE supervisor_id = ? ORDER BY name",
                    EMPLOYEE_COLUMNS
                );
                debug!(sql = %sql, supervisor_id, "Fetching employees");
                sqlx::query_as::<_, Employee>(&sql)
                    .bind(supervisor_id)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                let sql = format!("SELECT {} FROM employees ORDER BY name", EMPLOYEE_COLUMNS);
                debug!(sql = %sql, "Fetching employees");
                sqlx::query_as::<_, Employee>(&sql)
                    .fetch_all(&self.pool)
                    .await?
            }
        };
        Ok(employees)
    }

    async fn create_employee(
        &self,
        employee: &NewEmployee,
        tenant: TenantScope,
    ) -> Result<Employee, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (name, shift, sector, role, supervisor_id)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.name)
        .bind(&employee.shift)
        .bind(&employee.sector)
        .bind(&employee.role)
        .bind(tenant)
        .execute(&self.pool)
        .await?;

        Ok(Employee {
            id: result.last_insert_id(),
            name: employee.name.clone(),
            shift: employee.shift.clone(),
            sector: employee.sector.clone(),
            role: employee.role.clone(),
            supervisor_id: tenant,
        })
    }

    async fn delete_employee(&self, id: u64, tenant: TenantScope) -> Result<(), StoreError> {
        let result = match tenant {
            Some(supervisor_id) => {
                sqlx::query("DELETE FROM employees WHERE id = ? AND supervisor_id = ?")
                    .bind(id)
                    .bind(supervisor_id)
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM employees WHERE id = ?")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn list_attendance(
        &self,
        window: MonthWindow,
        tenant: TenantScope,
    ) -> Result<Vec<AttendanceEntry>, StoreError> {
        let start = window.first_day();
        let end = window.last_day();
        debug!(%start, %end, ?tenant, "Fetching schedules");

        let entries = match tenant {
            Some(supervisor_id) => {
                sqlx::query_as::<_, AttendanceEntry>(
                    r#"
                    SELECT employee_id, date, status
                    FROM schedules
                    WHERE date >= ? AND date <= ? AND supervisor_id = ?
                    "#,
                )
                .bind(start)
                .bind(end)
                .bind(supervisor_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, AttendanceEntry>(
                    r#"
                    SELECT employee_id, date, status
                    FROM schedules
                    WHERE date >= ? AND date <= ?
                    "#,
                )
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(entries)
    }

    async fn upsert_attendance(
        &self,
        entry: &AttendanceEntry,
        tenant: TenantScope,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO schedules (employee_id, date, status, supervisor_id)
            VALUES (?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE status = VALUES(status)
            "#,
        )
        .bind(entry.employee_id)
        .bind(entry.date)
        .bind(&entry.status)
        .bind(tenant)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn check_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Supervisor, StoreError> {
        let row = sqlx::query_as::<_, SupervisorRow>(
            r#"
            SELECT id, email, name, password_hash
            FROM supervisors
            WHERE email = ?
            "#,
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::Credentials)?;

        verify_password(password, &row.password_hash).map_err(|_| StoreError::Credentials)?;

        Ok(Supervisor {
            id: row.id,
            email: row.email,
            name: row.name,
        })
    }

    async fn create_supervisor(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<u64, StoreError> {
        let hashed = hash_password(password).map_err(|e| StoreError::Hashing(e.to_string()))?;

        let result = sqlx::query(
            r#"INSERT INTO supervisors (email, name, password_hash) VALUES (?, ?, ?)"#,
        )
        .bind(email)
        .bind(name)
        .bind(hashed)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) => Ok(done.last_insert_id()),
            Err(e) if is_duplicate(&e) => Err(StoreError::Rejected("Email já cadastrado".into())),
            Err(e) => Err(e.into()),
        }
    }

    async fn migrate_unowned(&self, supervisor_id: u64) -> Result<MigrationReport, StoreError> {
        let mut tx = self.pool.begin().await?;

        let employees = sqlx::query("UPDATE employees SET supervisor_id = ? WHERE supervisor_id IS NULL")
            .bind(supervisor_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let schedules = sqlx::query("UPDATE schedules SET supervisor_id = ? WHERE supervisor_id IS NULL")
            .bind(supervisor_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        info!(supervisor_id, employees, schedules, "Unowned rows migrated");
        Ok(MigrationReport {
            employees,
            schedules,
        })
    }
}
