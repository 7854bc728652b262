use crate::calc::{build_grid, DayCell, ViewMode, ViewState};
use crate::cmd::ViewOptions;
use crate::data::ScheduleMap;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Serialize, Debug)]
struct DaysReport {
    title: String,
    mode: ViewMode,
    days: Vec<DayCell>,
}

fn build_report(opts: &ViewOptions, today: NaiveDate) -> DaysReport {
    let view = ViewState::new(opts.anchor, opts.mode);
    DaysReport {
        title: view.title(),
        mode: view.mode,
        days: build_grid(&view, opts.week_start, &ScheduleMap::default(), today),
    }
}

pub fn run(opts: &ViewOptions, today: NaiveDate, json: bool) -> Result<()> {
    write_days(opts, today, json, &mut std::io::stdout())
}

pub(crate) fn write_days<W: std::io::Write>(
    opts: &ViewOptions,
    today: NaiveDate,
    json: bool,
    out: &mut W,
) -> Result<()> {
    let report = build_report(opts, today);
    tracing::debug!(days = report.days.len(), mode = ?report.mode, "enumerated days");

    if json {
        let text = serde_json::to_string_pretty(&report).context("failed to serialize JSON")?;
        writeln!(out, "{text}")?;
        return Ok(());
    }

    writeln!(out, "{}", report.title)?;
    writeln!(out, "---")?;
    for day in &report.days {
        let marker = if day.is_today { "  (today)" } else { "" };
        writeln!(out, "  {:<12} {}{}", day.key, day.label, marker)?;
    }
    writeln!(out, "---")?;
    writeln!(out, "Total: {} day(s)", report.days.len())?;
    Ok(())
}
