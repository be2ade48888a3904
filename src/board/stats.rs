use chrono::NaiveDate;
use serde::Serialize;
use strum_macros::{AsRefStr, EnumString};
use utoipa::ToSchema;

use super::grid::AttendanceGrid;
use crate::model::{
    employee::Employee,
    month::MonthWindow,
    status::{self, AttendanceStatus, STATUS_COUNT, STATUS_LIST},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Summary {
    #[schema(example = 42)]
    pub total: usize,
    #[schema(example = 30)]
    pub present_today: usize,
    #[schema(example = 5)]
    pub absences_month: usize,
}

/// Count of each enumerated code over one employee's month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTally {
    counts: [usize; STATUS_COUNT],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TallyBucket {
    #[schema(example = "X", value_type = String)]
    pub code: &'static str,
    #[schema(example = 2)]
    pub count: usize,
}

impl StatusTally {
    pub fn count(&self, status: AttendanceStatus) -> usize {
        self.counts[status as usize]
    }

    pub fn buckets(&self) -> Vec<TallyBucket> {
        STATUS_LIST
            .iter()
            .zip(self.counts)
            .map(|(s, count)| TallyBucket {
                code: s.code,
                count,
            })
            .collect()
    }
}

/// Histogram over the whole enumeration. Days without a status land in the
/// empty bucket; codes unknown to the table are not counted.
pub fn tally(employee_id: u64, grid: &AttendanceGrid, window: MonthWindow) -> StatusTally {
    let mut counts = [0; STATUS_COUNT];
    for date in window.dates() {
        if let Some(i) = status::position(grid.status_at(employee_id, date)) {
            counts[i] += 1;
        }
    }
    StatusTally { counts }
}

fn count_code(employee_id: u64, grid: &AttendanceGrid, window: MonthWindow, code: &str) -> usize {
    window
        .dates()
        .filter(|d| grid.status_at(employee_id, *d) == code)
        .count()
}

pub fn absences(employee_id: u64, grid: &AttendanceGrid, window: MonthWindow) -> usize {
    count_code(employee_id, grid, window, AttendanceStatus::Absence.code())
}

/// Employees marked Present on `today`. The grid only holds the viewed
/// month, so this is empty whenever `today` falls outside it.
pub fn present_on<'a>(
    employees: &'a [Employee],
    grid: &AttendanceGrid,
    today: NaiveDate,
) -> Vec<&'a Employee> {
    employees
        .iter()
        .filter(|e| grid.status_at(e.id, today) == AttendanceStatus::Present.code())
        .collect()
}

pub fn monthly_absences(employees: &[Employee], grid: &AttendanceGrid, window: MonthWindow) -> usize {
    employees.iter().map(|e| absences(e.id, grid, window)).sum()
}

/// Employees with at least one absence, most absences first. Ties keep
/// roster order.
pub fn ranked_absences<'a>(
    employees: &'a [Employee],
    grid: &AttendanceGrid,
    window: MonthWindow,
) -> Vec<(&'a Employee, usize)> {
    let mut ranked: Vec<_> = employees
        .iter()
        .map(|e| (e, absences(e.id, grid, window)))
        .filter(|(_, count)| *count > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

pub fn summarize(
    employees: &[Employee],
    grid: &AttendanceGrid,
    window: MonthWindow,
    today: NaiveDate,
) -> Summary {
    Summary {
        total: employees.len(),
        present_today: present_on(employees, grid, today).len(),
        absences_month: monthly_absences(employees, grid, window),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StatKind {
    Total,
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatItem {
    #[schema(example = 10)]
    pub id: u64,
    #[schema(example = "ALICE")]
    pub name: String,
    #[schema(example = "2 Falta(s)")]
    pub detail: String,
    pub highlight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatDetail {
    #[schema(example = "Faltas em Março")]
    pub title: String,
    pub items: Vec<StatItem>,
}

/// Drill-down list behind one of the summary cards.
pub fn drill_down(
    kind: StatKind,
    employees: &[Employee],
    grid: &AttendanceGrid,
    window: MonthWindow,
    today: NaiveDate,
) -> StatDetail {
    match kind {
        StatKind::Total => StatDetail {
            title: "Todos os Funcionários".to_string(),
            items: employees
                .iter()
                .map(|e| StatItem {
                    id: e.id,
                    name: e.name.clone(),
                    detail: format!("{} - {}", e.sector, e.shift),
                    highlight: false,
                })
                .collect(),
        },
        StatKind::Present => StatDetail {
            title: format!("Presentes Hoje ({})", today.format("%d/%m/%Y")),
            items: present_on(employees, grid, today)
                .into_iter()
                .map(|e| StatItem {
                    id: e.id,
                    name: e.name.clone(),
                    detail: "Presente".to_string(),
                    highlight: false,
                })
                .collect(),
        },
        StatKind::Absent => StatDetail {
            title: format!("Faltas em {}", window.name()),
            items: ranked_absences(employees, grid, window)
                .into_iter()
                .map(|(e, count)| StatItem {
                    id: e.id,
                    name: e.name.clone(),
                    detail: format!("{} Falta(s)", count),
                    highlight: true,
                })
                .collect(),
        },
    }
}
