pub mod dates;
pub mod grid;
pub mod view;

pub use grid::{build_grid, DayCell};
pub use view::{ViewMode, ViewState};
