use std::collections::HashMap;

use chrono::NaiveDate;
use derive_more::Display;

use crate::model::{attendance::AttendanceEntry, month::MonthWindow};

/// Cell address, displayed as `"{employee_id}-{YYYY-MM-DD}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{}-{}", employee_id, date)]
pub struct GridKey {
    pub employee_id: u64,
    pub date: NaiveDate,
}

impl GridKey {
    pub fn new(employee_id: u64, date: NaiveDate) -> Self {
        Self { employee_id, date }
    }
}

/// Sparse (employee, date) -> status code map for one month. A missing key
/// and an empty code both mean "no status".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceGrid {
    cells: HashMap<GridKey, String>,
}

impl AttendanceGrid {
    /// Builds the grid for `window`, keeping only entries inside the month
    /// that belong to `employees` and carry a status.
    pub fn from_entries<I>(window: MonthWindow, employees: &[u64], entries: I) -> Self
    where
        I: IntoIterator<Item = AttendanceEntry>,
    {
        let cells = entries
            .into_iter()
            .filter(|e| {
                !e.status.is_empty() && window.contains(e.date) && employees.contains(&e.employee_id)
            })
            .map(|e| (GridKey::new(e.employee_id, e.date), e.status))
            .collect();
        Self { cells }
    }

    pub fn status(&self, key: &GridKey) -> &str {
        self.cells.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn status_at(&self, employee_id: u64, date: NaiveDate) -> &str {
        self.status(&GridKey::new(employee_id, date))
    }

    pub fn set(&mut self, key: GridKey, code: &str) {
        self.cells.insert(key, code.to_string());
    }

    pub fn forget_employee(&mut self, employee_id: u64) {
        self.cells.retain(|k, _| k.employee_id != employee_id);
    }

    /// Cells that carry a status.
    pub fn len(&self) -> usize {
        self.cells.values().filter(|s| !s.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
