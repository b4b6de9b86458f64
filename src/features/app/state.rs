use super::chart::{ChartSeries, ScaleMode};
use crate::common::time::{Clock, SystemClock};
use crate::config::MonitorConfig;
use crate::features::metrics::StatsSnapshot;
use crate::features::metrics::aggregate::summarize;
use crate::features::metrics::report::format_report;
use crate::probe::Measurement;
use crate::runtime::SharedMonitor;
use std::net::IpAddr;
use std::time::Instant;
use tracing::info;

/// Discrete input delivered by the terminal layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UiEvent {
    Quit,
    ToggleScale,
    Resize(u16, u16),
}

/// Everything the terminal layer draws for one frame.
#[derive(Clone, Debug, Default)]
pub struct ViewModel {
    pub chart: ChartSeries,
    pub stats: StatsSnapshot,
    pub stats_text: String,
    pub fault: Option<String>,
}

pub struct MonitorApp {
    pub config: MonitorConfig,
    pub host: String,
    pub address: IpAddr,
    pub scale: ScaleMode,
    shared: SharedMonitor,
    started_at: Instant,
    measurements: Vec<Measurement>,
    view: ViewModel,
}

impl MonitorApp {
    pub fn new(
        config: MonitorConfig,
        host: String,
        address: IpAddr,
        shared: SharedMonitor,
        started_at: Instant,
    ) -> Self {
        Self {
            config,
            host,
            address,
            scale: ScaleMode::default(),
            shared,
            started_at,
            measurements: Vec::new(),
            view: ViewModel::default(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.shared.is_running()
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn tick(&mut self) -> bool {
        self.tick_with_clock(&SystemClock)
    }

    /// Refreshes the view from the latest snapshot. Returns false once the
    /// session has stopped, in which case nothing is rebuilt.
    pub fn tick_with_clock(&mut self, clock: &dyn Clock) -> bool {
        let snapshot = self.shared.snapshot();
        if !snapshot.running {
            return false;
        }

        // statistics stay frozen once the probe engine has halted
        if snapshot.fault.is_some() && self.view.fault.is_some() {
            return true;
        }

        let elapsed = clock.now().saturating_duration_since(self.started_at);
        self.measurements = snapshot.measurements;
        self.view.stats = summarize(&self.measurements, &self.config, elapsed);
        self.view.stats_text = format_report(&self.view.stats, &self.config);
        self.view.fault = snapshot.fault;
        self.rebuild_chart();
        true
    }

    pub fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Quit => {
                if self.shared.stop() {
                    info!("quit requested");
                }
            }
            UiEvent::ToggleScale => {
                self.scale = self.scale.toggle();
                self.rebuild_chart();
            }
            UiEvent::Resize(..) => {}
        }
    }

    /// Statistics over everything recorded so far, for the exit report.
    pub fn final_stats(&self) -> StatsSnapshot {
        let snapshot = self.shared.snapshot();
        summarize(
            &snapshot.measurements,
            &self.config,
            self.started_at.elapsed(),
        )
    }

    fn rebuild_chart(&mut self) {
        self.view.chart =
            ChartSeries::build(&self.measurements, self.config.dead_timeout_ms, self.scale);
    }
}
