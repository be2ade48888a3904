use chrono::NaiveDate;
use futures::lock::Mutex;
use tracing::{debug, info, warn};

use super::{
    Board, BoardError, BoardView, LoadTicket,
    grid::AttendanceGrid,
    render::CellView,
    stats::{StatDetail, StatKind, Summary},
};
use crate::{
    model::{
        attendance::AttendanceEntry,
        employee::{Employee, NewEmployee},
        month::MonthWindow,
    },
    store::{TenantScope, remote::Remote},
};

/// A board bound to its tenant and the store. The mutex serialises UI
/// events, so local edits apply in arrival order; remote writes are
/// fire-and-forget and may complete in any order.
pub struct BoardSession {
    tenant: TenantScope,
    remote: Remote,
    board: Mutex<Board>,
}

impl BoardSession {
    pub fn new(remote: Remote, tenant: TenantScope) -> Self {
        Self {
            tenant,
            remote,
            board: Mutex::new(Board::default()),
        }
    }

    pub async fn window(&self) -> Option<MonthWindow> {
        self.board.lock().await.window()
    }

    /// Fetches roster and month entries and replaces the board. On failure
    /// the previous contents stay. Returns whether this load was applied.
    pub async fn load(&self, window: MonthWindow) -> bool {
        let ticket = self.board.lock().await.begin_load(window);
        self.fetch(ticket, window).await
    }

    /// Moves the requested month by `delta` and reloads. The step is taken
    /// from the last requested month, so overlapping calls each advance it.
    /// An unloaded board moves relative to `today`'s month.
    pub async fn shift_month(&self, delta: i32, today: NaiveDate) -> Result<MonthWindow, BoardError> {
        let (ticket, target) = {
            let mut board = self.board.lock().await;
            let current = board
                .requested()
                .unwrap_or_else(|| MonthWindow::containing(today));
            let target = current.shift(delta).ok_or(BoardError::InvalidMonth)?;
            (board.begin_load(target), target)
        };
        self.fetch(ticket, target).await;
        Ok(target)
    }

    async fn fetch(&self, ticket: LoadTicket, window: MonthWindow) -> bool {
        let (employees, entries) = futures::join!(
            self.remote.list_employees(self.tenant),
            self.remote.list_attendance(window, self.tenant),
        );

        let (employees, entries) = match (employees, entries) {
            (Ok(employees), Ok(entries)) => (employees, entries),
            _ => {
                warn!(
                    year = window.year,
                    month = window.month,
                    tenant = ?self.tenant,
                    "Failed to load board, keeping previous contents"
                );
                return false;
            }
        };

        let applied = self
            .board
            .lock()
            .await
            .apply_load(ticket, employees, entries);
        if applied {
            info!(year = window.year, month = window.month, tenant = ?self.tenant, "Board loaded");
        }
        applied
    }

    pub async fn cycle_status(&self, employee_id: u64, day: u32) -> Result<CellView, BoardError> {
        let (entry, cell) = {
            let mut board = self.board.lock().await;
            let entry = board.cycle_status(employee_id, day)?;
            (entry, board.cell(employee_id, day)?)
        };
        self.persist(entry);
        Ok(cell)
    }

    pub async fn reset_status(&self, employee_id: u64, day: u32) -> Result<CellView, BoardError> {
        let (entry, cell) = {
            let mut board = self.board.lock().await;
            let entry = board.reset_status(employee_id, day)?;
            (entry, board.cell(employee_id, day)?)
        };
        if let Some(entry) = entry {
            self.persist(entry);
        }
        Ok(cell)
    }

    /// Spawns the remote write. A failure is logged by the remote boundary
    /// and the optimistic value stays on the board until the next load.
    fn persist(&self, entry: AttendanceEntry) {
        let remote = self.remote.clone();
        let tenant = self.tenant;
        actix_web::rt::spawn(async move {
            if remote.upsert_attendance(&entry, tenant).await.is_ok() {
                debug!(
                    employee_id = entry.employee_id,
                    date = %entry.date,
                    status = %entry.status,
                    "Attendance persisted"
                );
            }
        });
    }

    pub async fn add_employee(&self, employee: NewEmployee) -> Option<Employee> {
        let created = self.remote.create_employee(&employee, self.tenant).await.ok()?;
        info!(employee_id = created.id, name = %created.name, "Employee created");
        self.board.lock().await.add_employee(created.clone());
        Some(created)
    }

    pub async fn delete_employee(&self, employee_id: u64) -> bool {
        if self.remote.delete_employee(employee_id, self.tenant).await.is_err() {
            return false;
        }
        info!(employee_id, "Employee deleted");
        self.board.lock().await.remove_employee(employee_id);
        true
    }

    /// Roster of the scope. Served from the board when it is loaded.
    pub async fn employees(&self) -> Vec<Employee> {
        {
            let board = self.board.lock().await;
            if board.window().is_some() {
                return board.employees().to_vec();
            }
        }
        self.remote
            .list_employees(self.tenant)
            .await
            .unwrap_or_default()
    }

    pub async fn view(&self, search: Option<&str>, today: NaiveDate) -> Result<BoardView, BoardError> {
        self.board.lock().await.view(search, today)
    }

    pub async fn summary(&self, today: NaiveDate) -> Result<Summary, BoardError> {
        self.board.lock().await.summary(today)
    }

    pub async fn drill_down(&self, kind: StatKind, today: NaiveDate) -> Result<StatDetail, BoardError> {
        self.board.lock().await.drill_down(kind, today)
    }

    /// Roster and grid for `window`. The viewed month is served from memory,
    /// unconfirmed edits included; any other month is fetched without
    /// touching the board.
    pub async fn sheet(&self, window: MonthWindow) -> Option<(Vec<Employee>, AttendanceGrid)> {
        {
            let board = self.board.lock().await;
            if board.window() == Some(window) {
                return Some((board.employees().to_vec(), board.grid().clone()));
            }
        }

        let (employees, entries) = futures::join!(
            self.remote.list_employees(self.tenant),
            self.remote.list_attendance(window, self.tenant),
        );
        let employees = employees.ok()?;
        let entries = entries.ok()?;
        let ids: Vec<u64> = employees.iter().map(|e| e.id).collect();
        let grid = AttendanceGrid::from_entries(window, &ids, entries);
        Some((employees, grid))
    }
}
