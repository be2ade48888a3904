use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::status::{MONTHS, WEEK_DAYS};

/// A calendar month, `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct MonthWindow {
    #[schema(example = 2025)]
    pub year: i32,
    #[schema(example = 3)]
    pub month: u32,
}

impl MonthWindow {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    pub fn last_day(&self) -> NaiveDate {
        (28..=31)
            .rev()
            .find_map(|d| NaiveDate::from_ymd_opt(self.year, self.month, d))
            .unwrap_or_default()
    }

    pub fn days(&self) -> u32 {
        self.last_day().day()
    }

    /// Date of `day` within this month, `None` outside `1..=days()`.
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        if day == 0 || day > self.days() {
            return None;
        }
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (1..=self.days()).filter_map(|d| self.date(d))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Moves by `delta` months, carrying into the year. `None` when the
    /// result falls outside the calendar chrono can represent.
    pub fn shift(&self, delta: i32) -> Option<Self> {
        let index = self
            .year
            .checked_mul(12)?
            .checked_add(self.month as i32 - 1)?
            .checked_add(delta)?;
        Self::new(index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
    }

    pub fn name(&self) -> &'static str {
        MONTHS[(self.month - 1) as usize]
    }
}

pub fn weekday_label(weekday: Weekday) -> &'static str {
    WEEK_DAYS[weekday.num_days_from_sunday() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(MonthWindow::new(2024, 2).map(|w| w.days()), Some(29));
        assert_eq!(MonthWindow::new(2025, 2).map(|w| w.days()), Some(28));
        assert_eq!(MonthWindow::new(2025, 12).map(|w| w.days()), Some(31));
        assert!(MonthWindow::new(2025, 13).is_none());
        assert!(MonthWindow::new(2025, 0).is_none());
    }

    #[test]
    fn shift_wraps_years() {
        let jan = MonthWindow::new(2025, 1).unwrap();
        assert_eq!(jan.shift(-1), MonthWindow::new(2024, 12));
        assert_eq!(jan.shift(12), MonthWindow::new(2026, 1));
        assert_eq!(jan.shift(-25), MonthWindow::new(2022, 12));
    }

    #[test]
    fn shift_beyond_the_calendar_is_rejected() {
        let march = MonthWindow::new(2025, 3).unwrap();
        assert_eq!(march.shift(i32::MAX), None);
        assert_eq!(march.shift(i32::MIN), None);
        // a representable i32 index, but a year chrono cannot hold
        assert_eq!(march.shift(2_000_000_000), None);
        assert_eq!(march.shift(-2_000_000_000), None);
    }

    #[test]
    fn last_day_of_the_latest_month() {
        let last = NaiveDate::MAX;
        let window = MonthWindow::containing(last);
        assert_eq!(window.last_day(), last);
        assert_eq!(window.shift(1), None);
    }

    #[test]
    fn date_range_is_first_to_last_day() {
        let april = MonthWindow::new(2025, 4).unwrap();
        assert_eq!(april.first_day().to_string(), "2025-04-01");
        assert_eq!(april.last_day().to_string(), "2025-04-30");
        assert_eq!(april.date(31), None);
        assert_eq!(april.date(0), None);
        assert_eq!(april.dates().count(), 30);
        assert_eq!(april.name(), "Abril");
    }

    #[test]
    fn weekday_labels_start_on_sunday() {
        let sunday = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(weekday_label(sunday.weekday()), "DOM");
        assert_eq!(weekday_label(sunday.succ_opt().unwrap().weekday()), "SEG");
    }
}
