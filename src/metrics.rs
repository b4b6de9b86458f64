pub use crate::features::metrics::StatsSnapshot;
pub use crate::features::metrics::aggregate::{SeriesStore, summarize};
pub use crate::features::metrics::report::format_report;
