pub use crate::common::time::{Clock, SystemClock};
pub use crate::features::app::{ChartSeries, MonitorApp, ScaleMode, UiEvent, ViewModel};
