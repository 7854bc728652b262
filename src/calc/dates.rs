use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Canonical day-key used by the schedule store.
pub const KEY_FORMAT: &str = "%Y-%m-%d";
/// Day number only, e.g. "5".
pub const DAY_FORMAT: &str = "%-d";
/// Abbreviated weekday plus day number, e.g. "Sat 15".
pub const WEEKDAY_DAY_FORMAT: &str = "%a %-d";
/// Full month name and year, e.g. "June 2024".
pub const MONTH_YEAR_FORMAT: &str = "%B %Y";
/// Long date used for modal and week titles, e.g. "June 15, 2024".
pub const LONG_DATE_FORMAT: &str = "%B %-d, %Y";

/// First day of the week used by week-range enumeration.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    /// Column (0–6) of `date` in a week starting on this day.
    pub fn column_of(self, date: NaiveDate) -> usize {
        match self {
            WeekStart::Sunday => date.weekday().num_days_from_sunday() as usize,
            WeekStart::Monday => date.weekday().num_days_from_monday() as usize,
        }
    }

    /// Two-letter weekday header row, e.g. "Su Mo Tu We Th Fr Sa".
    pub fn header_labels(self) -> [&'static str; 7] {
        match self {
            WeekStart::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            WeekStart::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }
}

pub fn day_key(date: NaiveDate) -> String {
    date.format(KEY_FORMAT).to_string()
}

pub fn parse_day_key(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, KEY_FORMAT).ok()
}

pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    date.format(pattern).to_string()
}

pub fn is_today(date: NaiveDate, today: NaiveDate) -> bool {
    date == today
}

/// Every day in [start, end] inclusive, ascending. Empty when start > end.
pub fn each_day_of_interval(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    match (
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
        NaiveDate::from_ymd_opt(year, month, 1),
    ) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        // December of the last representable year
        _ => 31,
    }
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(days_in_month(date.year(), date.month())).unwrap_or(date)
}

pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let back = Duration::days(week_start.column_of(date) as i64);
    date.checked_sub_signed(back).unwrap_or(NaiveDate::MIN)
}

pub fn end_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let forward = Duration::days(6 - week_start.column_of(date) as i64);
    date.checked_add_signed(forward).unwrap_or(NaiveDate::MAX)
}

/// Shifts `date` by `months`, clamping the day to the target month's length.
/// Returns `date` unchanged when the result is out of chrono's range.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let year = date.year();
    let month = date.month() as i32;
    let new_total = month - 1 + months;
    let new_month = (new_total.rem_euclid(12) + 1) as u32;
    let new_year = year + new_total.div_euclid(12);
    let max_day = days_in_month(new_year, new_month);
    let new_day = date.day().min(max_day);
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}

/// Shifts `date` by `weeks` whole weeks; unchanged when out of range.
pub fn add_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    date.checked_add_signed(Duration::weeks(weeks)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_day_key_is_zero_padded() {
        assert_eq!(day_key(d(2024, 6, 5)), "2024-06-05");
    }

    #[test]
    fn test_parse_day_key() {
        assert_eq!(parse_day_key("2024-06-15"), Some(d(2024, 6, 15)));
        assert_eq!(parse_day_key("June 15"), None);
    }

    #[test]
    fn test_format_patterns() {
        let date = d(2024, 6, 15);
        assert_eq!(format_date(date, DAY_FORMAT), "15");
        assert_eq!(format_date(d(2024, 6, 1), DAY_FORMAT), "1");
        assert_eq!(format_date(date, WEEKDAY_DAY_FORMAT), "Sat 15");
        assert_eq!(format_date(date, MONTH_YEAR_FORMAT), "June 2024");
        assert_eq!(format_date(date, LONG_DATE_FORMAT), "June 15, 2024");
    }

    #[test]
    fn test_each_day_of_interval_inclusive() {
        let days = each_day_of_interval(d(2024, 2, 27), d(2024, 3, 1));
        assert_eq!(days, vec![d(2024, 2, 27), d(2024, 2, 28), d(2024, 2, 29), d(2024, 3, 1)]);
    }

    #[test]
    fn test_each_day_of_interval_single_and_empty() {
        assert_eq!(each_day_of_interval(d(2024, 1, 1), d(2024, 1, 1)).len(), 1);
        assert!(each_day_of_interval(d(2024, 1, 2), d(2024, 1, 1)).is_empty());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), 31);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 4), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(start_of_month(d(2024, 6, 15)), d(2024, 6, 1));
        assert_eq!(end_of_month(d(2024, 6, 15)), d(2024, 6, 30));
        assert_eq!(end_of_month(d(2024, 2, 3)), d(2024, 2, 29));
    }

    #[test]
    fn test_week_bounds_sunday_start() {
        // 2024-06-15 is a Saturday
        assert_eq!(start_of_week(d(2024, 6, 15), WeekStart::Sunday), d(2024, 6, 9));
        assert_eq!(end_of_week(d(2024, 6, 15), WeekStart::Sunday), d(2024, 6, 15));
        assert_eq!(start_of_week(d(2024, 6, 9), WeekStart::Sunday), d(2024, 6, 9));
    }

    #[test]
    fn test_week_bounds_monday_start() {
        assert_eq!(start_of_week(d(2024, 6, 15), WeekStart::Monday), d(2024, 6, 10));
        assert_eq!(end_of_week(d(2024, 6, 15), WeekStart::Monday), d(2024, 6, 16));
    }

    #[test]
    fn test_week_crossing_year_boundary() {
        // 2025-01-01 is a Wednesday
        assert_eq!(start_of_week(d(2025, 1, 1), WeekStart::Sunday), d(2024, 12, 29));
        assert_eq!(end_of_week(d(2025, 1, 1), WeekStart::Sunday), d(2025, 1, 4));
    }

    #[test]
    fn test_column_of() {
        assert_eq!(WeekStart::Sunday.column_of(d(2024, 6, 9)), 0);
        assert_eq!(WeekStart::Sunday.column_of(d(2024, 6, 15)), 6);
        assert_eq!(WeekStart::Monday.column_of(d(2024, 6, 9)), 6);
        assert_eq!(WeekStart::Monday.column_of(d(2024, 6, 10)), 0);
    }

    #[test]
    fn test_add_months_forward_and_backward() {
        assert_eq!(add_months(d(2024, 6, 15), 1), d(2024, 7, 15));
        assert_eq!(add_months(d(2024, 6, 15), -1), d(2024, 5, 15));
        assert_eq!(add_months(d(2024, 12, 1), 1), d(2025, 1, 1));
        assert_eq!(add_months(d(2024, 1, 1), -1), d(2023, 12, 1));
    }

    #[test]
    fn test_add_months_clamps_month_end() {
        assert_eq!(add_months(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(add_months(d(2025, 3, 31), -1), d(2025, 2, 28));
    }

    #[test]
    fn test_add_weeks() {
        assert_eq!(add_weeks(d(2024, 6, 15), 1), d(2024, 6, 22));
        assert_eq!(add_weeks(d(2024, 1, 3), -1), d(2023, 12, 27));
    }

    #[test]
    fn test_add_weeks_at_range_edge_is_unchanged() {
        assert_eq!(add_weeks(NaiveDate::MAX, 1), NaiveDate::MAX);
    }

    #[test]
    fn test_is_today() {
        assert!(is_today(d(2024, 6, 15), d(2024, 6, 15)));
        assert!(!is_today(d(2024, 6, 14), d(2024, 6, 15)));
    }

    #[test]
    fn test_week_start_serde_lowercase() {
        let yaml = serde_norway::to_string(&WeekStart::Monday).unwrap();
        assert_eq!(yaml.trim(), "monday");
        let parsed: WeekStart = serde_norway::from_str("sunday").unwrap();
        assert_eq!(parsed, WeekStart::Sunday);
    }
}
