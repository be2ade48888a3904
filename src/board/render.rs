use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{month::weekday_label, status};

pub const SUNDAY_LABEL: &str = "DOM";
pub const PLACEHOLDER: &str = "-";
const SUNDAY_COLORS: (&str, &str) = ("bg-purple-900/60", "text-purple-200");
const WEEKEND_COLOR: &str = "bg-purple-900/20";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CellTreatment {
    /// A real status is stored for the cell
    Status,
    Sunday,
    Weekend,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CellView {
    #[schema(example = 9)]
    pub day: u32,
    #[schema(example = "P")]
    pub label: String,
    #[schema(example = "bg-green-500", value_type = Option<String>)]
    pub background: Option<&'static str>,
    #[schema(example = "text-white", value_type = Option<String>)]
    pub foreground: Option<&'static str>,
    pub treatment: CellTreatment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DayHeader {
    #[schema(example = 9)]
    pub day: u32,
    #[schema(example = "DOM", value_type = String)]
    pub weekday: &'static str,
    pub is_weekend: bool,
    pub is_sunday: bool,
}

impl DayHeader {
    pub fn for_date(date: NaiveDate) -> Self {
        let weekday = date.weekday();
        Self {
            day: date.day(),
            weekday: weekday_label(weekday),
            is_weekend: matches!(weekday, Weekday::Sat | Weekday::Sun),
            is_sunday: weekday == Weekday::Sun,
        }
    }
}

/// Weekday defaults are computed here and never stored: any real status
/// wins over them.
pub fn render_cell(day: u32, code: &str, weekday: Weekday) -> CellView {
    if !code.is_empty() {
        let definition = status::find(code);
        return CellView {
            day,
            label: code.to_string(),
            background: definition.map(|d| d.color),
            foreground: definition.map(|d| d.text_color),
            treatment: CellTreatment::Status,
        };
    }

    match weekday {
        Weekday::Sun => CellView {
            day,
            label: SUNDAY_LABEL.to_string(),
            background: Some(SUNDAY_COLORS.0),
            foreground: Some(SUNDAY_COLORS.1),
            treatment: CellTreatment::Sunday,
        },
        Weekday::Sat => CellView {
            day,
            label: PLACEHOLDER.to_string(),
            background: Some(WEEKEND_COLOR),
            foreground: None,
            treatment: CellTreatment::Weekend,
        },
        _ => CellView {
            day,
            label: PLACEHOLDER.to_string(),
            background: None,
            foreground: None,
            treatment: CellTreatment::Blank,
        },
    }
}

pub fn render_date(code: &str, date: NaiveDate) -> CellView {
    render_cell(date.day(), code, date.weekday())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn stored_status_overrides_sunday_default() {
        let cell = render_date("X", date("2025-03-09"));
        assert_eq!(cell.label, "X");
        assert_eq!(cell.treatment, CellTreatment::Status);
        assert_eq!(cell.background, Some("bg-red-500"));
        assert_eq!(cell.foreground, Some("text-white"));
    }

    #[test]
    fn empty_sunday_shows_placeholder_label() {
        let cell = render_date("", date("2025-03-09"));
        assert_eq!(cell.label, SUNDAY_LABEL);
        assert_eq!(cell.treatment, CellTreatment::Sunday);
    }

    #[test]
    fn saturday_is_weaker_and_unlabelled() {
        let cell = render_date("", date("2025-03-08"));
        assert_eq!(cell.label, PLACEHOLDER);
        assert_eq!(cell.treatment, CellTreatment::Weekend);
        assert_eq!(cell.foreground, None);
    }

    #[test]
    fn weekday_without_status_is_blank() {
        let cell = render_date("", date("2025-03-10"));
        assert_eq!(cell.treatment, CellTreatment::Blank);
        assert_eq!(cell.background, None);
    }

    #[test]
    fn unknown_code_is_shown_raw_without_colors() {
        let cell = render_date("ZZ", date("2025-03-10"));
        assert_eq!(cell.label, "ZZ");
        assert_eq!(cell.treatment, CellTreatment::Status);
        assert_eq!(cell.background, None);
    }

    #[test]
    fn header_flags() {
        let sunday = DayHeader::for_date(date("2025-03-09"));
        assert!(sunday.is_sunday && sunday.is_weekend);
        assert_eq!(sunday.weekday, "DOM");
        let saturday = DayHeader::for_date(date("2025-03-08"));
        assert!(!saturday.is_sunday && saturday.is_weekend);
        assert_eq!(saturday.weekday, "SÁB");
    }
}
