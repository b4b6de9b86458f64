mod chart;
mod state;

pub use chart::{ChartSeries, ScaleMode};
pub use state::{MonitorApp, UiEvent, ViewModel};
