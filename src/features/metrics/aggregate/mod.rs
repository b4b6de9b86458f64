mod stats;
mod store;

pub use stats::summarize;
pub use store::SeriesStore;
