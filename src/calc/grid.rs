use crate::calc::dates::{self, WeekStart, DAY_FORMAT, WEEKDAY_DAY_FORMAT};
use crate::calc::view::{ViewMode, ViewState};
use crate::data::ScheduleMap;
use chrono::NaiveDate;
use serde::Serialize;

/// Entries shown before the "+ N more" hint kicks in.
pub const OVERFLOW_THRESHOLD: usize = 2;

/// Everything needed to draw one day of the grid.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub key: String,
    pub label: String,
    pub entries: Vec<String>,
    pub overflow: Option<String>,
    pub is_today: bool,
}

/// "+ N more" when `count` exceeds the threshold. Only a hint rendered beneath
/// the entries; it does not hide any of them.
pub fn overflow_label(count: usize) -> Option<String> {
    (count > OVERFLOW_THRESHOLD).then(|| format!("+ {} more", count - OVERFLOW_THRESHOLD))
}

/// The slice of a day's entries that fits in a cell, plus the hint line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellWindow {
    pub start: usize,
    pub shown: usize,
    pub hint: Option<String>,
}

/// Fits `total` entries into `height` lines, keeping `selected` visible.
///
/// When everything fits this is the plain grid policy (all entries plus
/// `overflow_label`). Otherwise the last line is kept for a hint that counts
/// the entries left out.
pub fn fit_entries(total: usize, height: usize, selected: Option<usize>) -> CellWindow {
    let hint = overflow_label(total);
    if total + usize::from(hint.is_some()) <= height {
        return CellWindow {
            start: 0,
            shown: total,
            hint,
        };
    }
    let capacity = height.saturating_sub(1);
    if capacity == 0 {
        return match (height, selected) {
            (0, _) => CellWindow {
                start: 0,
                shown: 0,
                hint: None,
            },
            (_, Some(i)) if i < total => CellWindow {
                start: i,
                shown: 1,
                hint: None,
            },
            _ => CellWindow {
                start: 0,
                shown: 0,
                hint: Some(format!("+ {total} more")),
            },
        };
    }
    let start = selected
        .filter(|i| *i < total)
        .map_or(0, |i| (i + 1).saturating_sub(capacity));
    CellWindow {
        start,
        shown: capacity,
        hint: Some(format!("+ {} more", total - capacity)),
    }
}

pub fn build_grid(
    view: &ViewState,
    week_start: WeekStart,
    schedule: &ScheduleMap,
    today: NaiveDate,
) -> Vec<DayCell> {
    let label_format = match view.mode {
        ViewMode::Month => DAY_FORMAT,
        ViewMode::Week => WEEKDAY_DAY_FORMAT,
    };
    view.visible_days(week_start)
        .into_iter()
        .map(|date| {
            let entries = schedule.entries(date).to_vec();
            DayCell {
                date,
                key: dates::day_key(date),
                label: dates::format_date(date, label_format),
                overflow: overflow_label(entries.len()),
                entries,
                is_today: dates::is_today(date, today),
            }
        })
        .collect()
}
