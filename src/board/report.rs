use serde::Serialize;
use utoipa::ToSchema;

use super::{
    grid::AttendanceGrid,
    render::{DayHeader, SUNDAY_LABEL},
    stats::{self, TallyBucket},
};
use crate::model::{employee::Employee, month::MonthWindow, status::STATUS_LIST};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReportRow {
    #[schema(example = "ALICE")]
    pub name: String,
    #[schema(example = "2ª")]
    pub shift: String,
    #[schema(example = "RECEBIMENTO")]
    pub sector: String,
    /// One entry per day: the stored code, `DOM` on an empty Sunday, or
    /// an empty string
    pub days: Vec<String>,
    pub totals: Vec<TallyBucket>,
}

/// Monthly attendance sheet as printed for HR.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MonthlyReport {
    pub window: MonthWindow,
    #[schema(example = "Março", value_type = String)]
    pub month_name: &'static str,
    pub days: Vec<DayHeader>,
    pub rows: Vec<ReportRow>,
}

pub fn build_report(window: MonthWindow, employees: &[Employee], grid: &AttendanceGrid) -> MonthlyReport {
    let days: Vec<DayHeader> = window.dates().map(DayHeader::for_date).collect();

    let rows = employees
        .iter()
        .map(|e| ReportRow {
            name: e.name.clone(),
            shift: e.shift.clone(),
            sector: e.sector.clone(),
            days: window
                .dates()
                .zip(&days)
                .map(|(date, header)| match grid.status_at(e.id, date) {
                    "" if header.is_sunday => SUNDAY_LABEL.to_string(),
                    code => code.to_string(),
                })
                .collect(),
            totals: stats::tally(e.id, grid, window).buckets(),
        })
        .collect();

    MonthlyReport {
        window,
        month_name: window.name(),
        days,
        rows,
    }
}

/// Comma separated export: `name,shift,sector`, one column per day with the
/// raw stored code, then one count column per non-empty status code.
pub fn export_csv(
    window: MonthWindow,
    employees: &[Employee],
    grid: &AttendanceGrid,
) -> Result<Vec<u8>, csv::Error> {
    let codes = &STATUS_LIST[1..];
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = vec!["name".into(), "shift".into(), "sector".into()];
    header.extend((1..=window.days()).map(|d| d.to_string()));
    header.extend(codes.iter().map(|s| s.code.to_string()));
    writer.write_record(&header)?;

    for e in employees {
        let tally = stats::tally(e.id, grid, window).buckets();

        let mut record: Vec<String> = vec![e.name.clone(), e.shift.clone(), e.sector.clone()];
        record.extend(window.dates().map(|d| grid.status_at(e.id, d).to_string()));
        record.extend(tally.iter().skip(1).map(|b| b.count.to_string()));
        writer.write_record(&record)?;
    }

    writer.into_inner().map_err(|e| e.into_error().into())
}

/// File name offered for the CSV download.
pub fn export_file_name(window: MonthWindow) -> String {
    format!("escala-{}-{:02}.csv", window.year, window.month)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::grid::GridKey;

    fn employee(id: u64, name: &str) -> Employee {
        Employee {
            id,
            name: name.into(),
            shift: "2ª".into(),
            sector: "RECEBIMENTO".into(),
            role: None,
            supervisor_id: None,
        }
    }

    fn february() -> MonthWindow {
        MonthWindow::new(2025, 2).unwrap()
    }

    fn grid() -> AttendanceGrid {
        let mut grid = AttendanceGrid::default();
        grid.set(GridKey::new(1, february().date(3).unwrap()), "P");
        grid.set(GridKey::new(1, february().date(4).unwrap()), "X");
        grid.set(GridKey::new(1, february().date(9).unwrap()), "DT");
        grid
    }

    #[test]
    fn report_rows_mark_empty_sundays() {
        let report = build_report(february(), &[employee(1, "ALICE")], &grid());
        let row = &report.rows[0];
        assert_eq!(row.days.len(), 28);
        assert_eq!(row.days[1], "DOM");
        assert_eq!(row.days[2], "P");
        assert_eq!(row.days[8], "DT");
        assert_eq!(row.days[9], "");
        assert_eq!(row.totals[4], TallyBucket { code: "X", count: 1 });
        assert_eq!(report.month_name, "Fevereiro");
    }

    #[test]
    fn csv_has_day_and_code_columns() {
        let bytes = export_csv(february(), &[employee(1, "ALICE"), employee(2, "BRUNO")], &grid())
            .unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);

        let header: Vec<&str> = lines[0].split(',').collect();
        assert_eq!(&header[..4], &["name", "shift", "sector", "1"]);
        assert_eq!(header.len(), 3 + 28 + 10);
        assert_eq!(header[31], "P");

        let alice: Vec<&str> = lines[1].split(',').collect();
        assert_eq!(alice[0], "ALICE");
        assert_eq!(alice[3 + 2], "P");
        assert_eq!(alice[3 + 1], "");
        assert_eq!(alice[31], "1");
        assert_eq!(alice[34], "1");

        let bruno: Vec<&str> = lines[2].split(',').collect();
        assert!(bruno[31..].iter().all(|c| *c == "0"));
    }

    #[test]
    fn file_name_is_zero_padded() {
        assert_eq!(export_file_name(february()), "escala-2025-02.csv");
    }
}
