//! In-process store used by the tests. Supports injected failures and
//! per-month gates that hold `list_attendance` until released.

use std::{
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicBool, Ordering},
    },
};

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::channel::oneshot;

use super::{MigrationReport, ScheduleStore, StoreError, TenantScope};
use crate::model::{
    attendance::AttendanceEntry,
    employee::{Employee, NewEmployee},
    month::MonthWindow,
    supervisor::Supervisor,
};

pub const ADMIN_EMAIL: &str = "admin@escala.com";
pub const ADMIN_PASSWORD: &str = "admin123";

#[derive(Default)]
struct MemoryState {
    employees: Vec<Employee>,
    schedules: HashMap<(u64, NaiveDate), (String, Option<u64>)>,
    supervisors: Vec<(Supervisor, String)>,
    next_id: u64,
    writes: Vec<AttendanceEntry>,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    failing: AtomicBool,
    gates: Mutex<HashMap<MonthWindow, oneshot::Receiver<()>>>,
}

fn sql_failure() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}

impl MemoryStore {
    /// One supervisor (id 1) owning ALICE (10) and BRUNO (11).
    pub fn seeded() -> Self {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            state.next_id = 100;
            state.supervisors.push((
                Supervisor {
                    id: 1,
                    email: ADMIN_EMAIL.into(),
                    name: "admin".into(),
                },
                ADMIN_PASSWORD.into(),
            ));
            for (id, name) in [(10, "ALICE"), (11, "BRUNO")] {
                state.employees.push(Employee {
                    id,
                    name: name.into(),
                    shift: "2ª".into(),
                    sector: "RECEBIMENTO".into(),
                    role: None,
                    supervisor_id: Some(1),
                });
            }
        }
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// `list_attendance` for `window` waits until the returned sender fires
    /// or is dropped.
    pub fn hold_attendance(&self, window: MonthWindow) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(window, rx);
        tx
    }

    pub fn put_employee(&self, employee: Employee) {
        self.state.lock().unwrap().employees.push(employee);
    }

    pub fn put_entry(&self, entry: AttendanceEntry, owner: Option<u64>) {
        self.state
            .lock()
            .unwrap()
            .schedules
            .insert((entry.employee_id, entry.date), (entry.status, owner));
    }

    pub fn status_of(&self, employee_id: u64, date: NaiveDate) -> Option<String> {
        self.state
            .lock()
            .unwrap()
            .schedules
            .get(&(employee_id, date))
            .map(|(status, _)| status.clone())
    }

    pub fn writes(&self) -> Vec<AttendanceEntry> {
        self.state.lock().unwrap().writes.clone()
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(sql_failure())
        } else {
            Ok(())
        }
    }
}

fn in_scope(owner: Option<u64>, tenant: TenantScope) -> bool {
    tenant.is_none() || owner == tenant
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn list_employees(&self, tenant: TenantScope) -> Result<Vec<Employee>, StoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        let mut employees: Vec<Employee> = state
            .employees
            .iter()
            .filter(|e| in_scope(e.supervisor_id, tenant))
            .cloned()
            .collect();
        employees.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(employees)
    }

    async fn create_employee(
        &self,
        employee: &NewEmployee,
        tenant: TenantScope,
    ) -> Result<Employee, StoreError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let created = Employee {
            id: state.next_id,
            name: employee.name.clone(),
            shift: employee.shift.clone(),
            sector: employee.sector.clone(),
            role: employee.role.clone(),
            supervisor_id: tenant,
        };
        state.employees.push(created.clone());
        Ok(created)
    }

    async fn delete_employee(&self, id: u64, tenant: TenantScope) -> Result<(), StoreError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let before = state.employees.len();
        state
            .employees
            .retain(|e| !(e.id == id && in_scope(e.supervisor_id, tenant)));
        if state.employees.len() == before {
            return Err(StoreError::NotFound);
        }
        state.schedules.retain(|(employee_id, _), _| *employee_id != id);
        Ok(())
    }

    async fn list_attendance(
        &self,
        window: MonthWindow,
        tenant: TenantScope,
    ) -> Result<Vec<AttendanceEntry>, StoreError> {
        let gate = self.gates.lock().unwrap().remove(&window);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        self.check()?;

        let state = self.state.lock().unwrap();
        Ok(state
            .schedules
            .iter()
            .filter(|((_, date), (_, owner))| window.contains(*date) && in_scope(*owner, tenant))
            .map(|((employee_id, date), (status, _))| AttendanceEntry {
                employee_id: *employee_id,
                date: *date,
                status: status.clone(),
            })
            .collect())
    }

    async fn upsert_attendance(
        &self,
        entry: &AttendanceEntry,
        tenant: TenantScope,
    ) -> Result<(), StoreError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        state
            .schedules
            .insert((entry.employee_id, entry.date), (entry.status.clone(), tenant));
        state.writes.push(entry.clone());
        Ok(())
    }

    async fn check_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Supervisor, StoreError> {
        self.check()?;
        let state = self.state.lock().unwrap();
        state
            .supervisors
            .iter()
            .find(|(s, p)| s.email == email && p == password)
            .map(|(s, _)| s.clone())
            .ok_or(StoreError::Credentials)
    }

    async fn create_supervisor(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<u64, StoreError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        if state.supervisors.iter().any(|(s, _)| s.email == email) {
            return Err(StoreError::Rejected("Email já cadastrado".into()));
        }
        state.next_id += 1;
        let id = state.next_id;
        state.supervisors.push((
            Supervisor {
                id,
                email: email.into(),
                name: name.into(),
            },
            password.into(),
        ));
        Ok(id)
    }

    async fn migrate_unowned(&self, supervisor_id: u64) -> Result<MigrationReport, StoreError> {
        self.check()?;
        let mut state = self.state.lock().unwrap();
        let mut report = MigrationReport {
            employees: 0,
            schedules: 0,
        };
        for employee in state.employees.iter_mut().filter(|e| e.supervisor_id.is_none()) {
            employee.supervisor_id = Some(supervisor_id);
            report.employees += 1;
        }
        for (_, owner) in state.schedules.values_mut().filter(|(_, o)| o.is_none()) {
            *owner = Some(supervisor_id);
            report.schedules += 1;
        }
        Ok(report)
    }
}
