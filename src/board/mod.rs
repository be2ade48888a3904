pub mod grid;
pub mod registry;
pub mod render;
pub mod report;
pub mod session;
pub mod stats;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use utoipa::ToSchema;

use crate::model::{
    attendance::AttendanceEntry,
    employee::Employee,
    month::MonthWindow,
    status,
};
use grid::{AttendanceGrid, GridKey};
use render::{CellView, DayHeader};
use stats::{StatDetail, StatKind, Summary};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board has not been loaded yet")]
    NotLoaded,
    #[error("day {day} is outside the viewed month (1..={days})")]
    DayOutOfRange { day: u32, days: u32 },
    #[error("employee {0} is not on the loaded roster")]
    UnknownEmployee(u64),
    #[error("invalid month")]
    InvalidMonth,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RowView {
    pub employee: Employee,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BoardView {
    pub window: MonthWindow,
    #[schema(example = "Março", value_type = String)]
    pub month_name: &'static str,
    pub days: Vec<DayHeader>,
    pub rows: Vec<RowView>,
    pub summary: Summary,
}

/// Issued when a load starts. Only the most recently issued ticket may be
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    window: MonthWindow,
}

/// In-memory state of one attendance board. All mutation is synchronous;
/// remote confirmation is the caller's business.
#[derive(Debug, Default)]
pub struct Board {
    window: Option<MonthWindow>,
    /// Month of the newest issued load, ahead of `window` while it is in flight
    requested: Option<MonthWindow>,
    employees: Vec<Employee>,
    grid: AttendanceGrid,
    issued: u64,
}

impl Board {
    pub fn window(&self) -> Option<MonthWindow> {
        self.window
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn grid(&self) -> &AttendanceGrid {
        &self.grid
    }

    /// The month navigation is relative to: the last one asked for, even
    /// before its fetch completes.
    pub fn requested(&self) -> Option<MonthWindow> {
        self.requested.or(self.window)
    }

    pub fn begin_load(&mut self, window: MonthWindow) -> LoadTicket {
        self.issued += 1;
        self.requested = Some(window);
        LoadTicket {
            seq: self.issued,
            window,
        }
    }

    /// Replaces roster and grid with a completed fetch. Returns `false` and
    /// leaves the board untouched when a newer load has been issued since.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        employees: Vec<Employee>,
        entries: Vec<AttendanceEntry>,
    ) -> bool {
        if ticket.seq != self.issued {
            debug!(
                year = ticket.window.year,
                month = ticket.window.month,
                "Discarding superseded load"
            );
            return false;
        }

        let ids: Vec<u64> = employees.iter().map(|e| e.id).collect();
        self.grid = AttendanceGrid::from_entries(ticket.window, &ids, entries);
        self.employees = employees;
        self.window = Some(ticket.window);
        true
    }

    fn key(&self, employee_id: u64, day: u32) -> Result<GridKey, BoardError> {
        let window = self.window.ok_or(BoardError::NotLoaded)?;
        let date = window.date(day).ok_or(BoardError::DayOutOfRange {
            day,
            days: window.days(),
        })?;
        if !self.employees.iter().any(|e| e.id == employee_id) {
            return Err(BoardError::UnknownEmployee(employee_id));
        }
        Ok(GridKey::new(employee_id, date))
    }

    /// Advances the cell one step in the status cycle and returns the entry
    /// to persist.
    pub fn cycle_status(&mut self, employee_id: u64, day: u32) -> Result<AttendanceEntry, BoardError> {
        let key = self.key(employee_id, day)?;
        let next = status::next_code(self.grid.status(&key));
        self.grid.set(key, next);

        Ok(AttendanceEntry {
            employee_id,
            date: key.date,
            status: next.to_string(),
        })
    }

    /// Clears the cell. `None` when it was already empty, in which case
    /// nothing needs persisting.
    pub fn reset_status(
        &mut self,
        employee_id: u64,
        day: u32,
    ) -> Result<Option<AttendanceEntry>, BoardError> {
        let key = self.key(employee_id, day)?;
        if self.grid.status(&key).is_empty() {
            return Ok(None);
        }
        self.grid.set(key, "");

        Ok(Some(AttendanceEntry {
            employee_id,
            date: key.date,
            status: String::new(),
        }))
    }

    pub fn cell(&self, employee_id: u64, day: u32) -> Result<CellView, BoardError> {
        let key = self.key(employee_id, day)?;
        Ok(render::render_date(self.grid.status(&key), key.date))
    }

    pub fn add_employee(&mut self, employee: Employee) {
        self.employees.push(employee);
    }

    pub fn remove_employee(&mut self, employee_id: u64) {
        self.employees.retain(|e| e.id != employee_id);
        self.grid.forget_employee(employee_id);
    }

    pub fn summary(&self, today: NaiveDate) -> Result<Summary, BoardError> {
        let window = self.window.ok_or(BoardError::NotLoaded)?;
        Ok(stats::summarize(&self.employees, &self.grid, window, today))
    }

    pub fn drill_down(&self, kind: StatKind, today: NaiveDate) -> Result<StatDetail, BoardError> {
        let window = self.window.ok_or(BoardError::NotLoaded)?;
        Ok(stats::drill_down(kind, &self.employees, &self.grid, window, today))
    }

    /// Full table for the viewed month. `search` filters rows only; the
    /// summary always covers the whole roster.
    pub fn view(&self, search: Option<&str>, today: NaiveDate) -> Result<BoardView, BoardError> {
        let window = self.window.ok_or(BoardError::NotLoaded)?;
        let term = search.map(str::trim).filter(|t| !t.is_empty());

        let rows = self
            .employees
            .iter()
            .filter(|e| term.is_none_or(|t| e.matches(t)))
            .map(|e| RowView {
                employee: e.clone(),
                cells: window
                    .dates()
                    .map(|d| render::render_date(self.grid.status_at(e.id, d), d))
                    .collect(),
            })
            .collect();

        Ok(BoardView {
            window,
            month_name: window.name(),
            days: window.dates().map(DayHeader::for_date).collect(),
            rows,
            summary: stats::summarize(&self.employees, &self.grid, window, today),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::status::STATUS_LIST;
    use render::CellTreatment;

    fn alice() -> Employee {
        Employee {
            id: 1,
            name: "ALICE".into(),
            shift: "2ª".into(),
            sector: "RECEBIMENTO".into(),
            role: None,
            supervisor_id: Some(1),
        }
    }

    fn march() -> MonthWindow {
        MonthWindow::new(2025, 3).unwrap()
    }

    fn loaded(entries: Vec<AttendanceEntry>) -> Board {
        let mut board = Board::default();
        let ticket = board.begin_load(march());
        assert!(board.apply_load(ticket, vec![alice()], entries));
        board
    }

    #[test]
    fn first_cycle_marks_present_and_eleventh_returns_to_empty() {
        let mut board = loaded(vec![]);

        let entry = board.cycle_status(1, 5).unwrap();
        assert_eq!(entry.status, "P");
        assert_eq!(entry.date.to_string(), "2025-03-05");

        for _ in 1..STATUS_LIST.len() - 1 {
            board.cycle_status(1, 5).unwrap();
        }
        assert_eq!(board.grid().status_at(1, entry.date), "DOM");

        let last = board.cycle_status(1, 5).unwrap();
        assert_eq!(last.status, "");
        assert_eq!(board.grid().status_at(1, entry.date), "");
    }

    #[test]
    fn every_cycle_advances_exactly_one_position() {
        let mut board = loaded(vec![]);
        let mut previous = "".to_string();
        for _ in 0..STATUS_LIST.len() * 2 {
            let entry = board.cycle_status(1, 12).unwrap();
            assert_eq!(entry.status, status::next_code(&previous));
            previous = entry.status;
        }
    }

    #[test]
    fn reset_is_idempotent() {
        let mut board = loaded(vec![]);
        board.cycle_status(1, 3).unwrap();

        let first = board.reset_status(1, 3).unwrap();
        assert_eq!(first.map(|e| e.status), Some(String::new()));
        let after_first = board.grid().clone();

        assert_eq!(board.reset_status(1, 3).unwrap(), None);
        assert_eq!(board.grid(), &after_first);
    }

    #[test]
    fn reset_on_never_set_cell_is_a_noop() {
        let mut board = loaded(vec![]);
        assert_eq!(board.reset_status(1, 4).unwrap(), None);
    }

    #[test]
    fn edits_are_validated_against_the_viewed_month() {
        let mut unloaded = Board::default();
        assert_eq!(unloaded.cycle_status(1, 1), Err(BoardError::NotLoaded));

        let mut board = loaded(vec![]);
        assert_eq!(
            board.cycle_status(1, 32),
            Err(BoardError::DayOutOfRange { day: 32, days: 31 })
        );
        assert_eq!(board.cycle_status(99, 1), Err(BoardError::UnknownEmployee(99)));
    }

    #[test]
    fn stored_status_on_sunday_renders_the_status() {
        let board = loaded(vec![AttendanceEntry {
            employee_id: 1,
            date: "2025-03-09".parse().unwrap(),
            status: "X".into(),
        }]);
        let cell = board.cell(1, 9).unwrap();
        assert_eq!(cell.label, "X");
        assert_eq!(cell.treatment, CellTreatment::Status);

        let sunday = board.cell(1, 16).unwrap();
        assert_eq!(sunday.label, "DOM");
        assert_eq!(sunday.treatment, CellTreatment::Sunday);
    }

    #[test]
    fn superseded_load_is_discarded() {
        let mut board = Board::default();
        let march_ticket = board.begin_load(march());
        let april = march().shift(1).unwrap();
        let april_ticket = board.begin_load(april);
        assert_eq!(board.requested(), Some(april));
        assert_eq!(board.window(), None);

        assert!(board.apply_load(april_ticket, vec![alice()], vec![]));
        assert!(!board.apply_load(march_ticket, vec![], vec![]));
        assert_eq!(board.window(), Some(april));
        assert_eq!(board.employees().len(), 1);
    }

    #[test]
    fn removing_an_employee_drops_their_cells() {
        let mut board = loaded(vec![AttendanceEntry {
            employee_id: 1,
            date: "2025-03-03".parse().unwrap(),
            status: "X".into(),
        }]);
        board.remove_employee(1);
        assert!(board.employees().is_empty());
        assert!(board.grid().is_empty());
        assert_eq!(board.summary(march().first_day()).unwrap().absences_month, 0);
    }

    #[test]
    fn view_filters_rows_but_not_summary() {
        let mut board = loaded(vec![]);
        board.add_employee(Employee {
            id: 2,
            name: "BRUNO".into(),
            shift: "1ª".into(),
            sector: "EXPEDIÇÃO".into(),
            role: None,
            supervisor_id: Some(1),
        });

        let view = board.view(Some("expedi"), march().first_day()).unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].employee.id, 2);
        assert_eq!(view.rows[0].cells.len(), 31);
        assert_eq!(view.days.len(), 31);
        assert_eq!(view.summary.total, 2);
        assert_eq!(view.month_name, "Março");
    }
}
