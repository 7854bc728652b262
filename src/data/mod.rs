pub mod app_settings;
pub mod persistence;
pub mod schedule;

pub use app_settings::AppSettings;
pub use schedule::ScheduleMap;
