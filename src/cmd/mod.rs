pub mod days;
pub mod init;
pub mod root;

use crate::calc::ViewMode;
use crate::calc::dates::WeekStart;
use crate::data::AppSettings;
use chrono::NaiveDate;

/// View options resolved from config.yaml and command-line overrides.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewOptions {
    pub anchor: NaiveDate,
    pub mode: ViewMode,
    pub week_start: WeekStart,
}

impl ViewOptions {
    /// Command-line values win over settings; the anchor falls back to `today`.
    pub fn resolve(
        settings: &AppSettings,
        date: Option<NaiveDate>,
        view: Option<ViewMode>,
        today: NaiveDate,
    ) -> Self {
        ViewOptions {
            anchor: date.unwrap_or(today),
            mode: view.unwrap_or(settings.default_view),
            week_start: settings.week_start,
        }
    }
}
