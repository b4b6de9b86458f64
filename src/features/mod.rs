pub mod app;
pub mod metrics;
pub mod probe;
pub mod ui;
