use crate::calc::dates::{self, WeekStart, LONG_DATE_FORMAT, MONTH_YEAR_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Month,
    Week,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Month => ViewMode::Week,
            ViewMode::Week => ViewMode::Month,
        }
    }
}

/// Anchor date plus view mode. Decides which days the grid shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub anchor: NaiveDate,
    pub mode: ViewMode,
}

impl ViewState {
    pub fn new(anchor: NaiveDate, mode: ViewMode) -> Self {
        ViewState { anchor, mode }
    }

    pub fn go_to_previous(&mut self) {
        self.anchor = match self.mode {
            ViewMode::Month => dates::add_months(self.anchor, -1),
            ViewMode::Week => dates::add_weeks(self.anchor, -1),
        };
        tracing::debug!(anchor = %self.anchor, mode = ?self.mode, "navigated back");
    }

    pub fn go_to_next(&mut self) {
        self.anchor = match self.mode {
            ViewMode::Month => dates::add_months(self.anchor, 1),
            ViewMode::Week => dates::add_weeks(self.anchor, 1),
        };
        tracing::debug!(anchor = %self.anchor, mode = ?self.mode, "navigated forward");
    }

    /// Flips month/week. The anchor is kept as-is.
    pub fn toggle_view_mode(&mut self) {
        self.mode = self.mode.toggled();
        tracing::debug!(mode = ?self.mode, "view mode toggled");
    }

    pub fn go_to_today(&mut self, today: NaiveDate) {
        self.anchor = today;
    }

    /// Ordered days to display for the current mode.
    pub fn visible_days(&self, week_start: WeekStart) -> Vec<NaiveDate> {
        let (start, end) = match self.mode {
            ViewMode::Month => (
                dates::start_of_month(self.anchor),
                dates::end_of_month(self.anchor),
            ),
            ViewMode::Week => (
                dates::start_of_week(self.anchor, week_start),
                dates::end_of_week(self.anchor, week_start),
            ),
        };
        dates::each_day_of_interval(start, end)
    }

    pub fn title(&self) -> String {
        match self.mode {
            ViewMode::Month => dates::format_date(self.anchor, MONTH_YEAR_FORMAT),
            ViewMode::Week => format!(
                "Week of {}",
                dates::format_date(self.anchor, LONG_DATE_FORMAT)
            ),
        }
    }

    /// Label of the control that switches to the other mode.
    pub fn toggle_label(&self) -> &'static str {
        match self.mode {
            ViewMode::Month => "Week view",
            ViewMode::Week => "Month view",
        }
    }
}
