mod common;
mod features;

pub mod app;
pub mod config;
pub mod data_model;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod probe;
pub mod probe_engine;
pub mod runtime;
pub mod settings;
pub mod ui;
