use crate::cmd::ViewOptions;
use crate::ui::calendar_view::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::NaiveDate;

pub fn run(opts: &ViewOptions, today: NaiveDate) -> Result<()> {
    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    tracing::info!(anchor = %opts.anchor, mode = ?opts.mode, "starting calendar");
    let mut terminal = setup_terminal()?;
    let mut app = App::new(opts.anchor, opts.mode, opts.week_start, today);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;

    // Entries are not persisted; report what is discarded.
    tracing::info!(
        entries = app.schedule().total_entries(),
        days = app.schedule().len_days(),
        "calendar closed"
    );
    result
}
