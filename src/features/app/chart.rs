use crate::probe::Measurement;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ScaleMode {
    #[default]
    Linear,
    Log,
}

impl ScaleMode {
    pub fn toggle(self) -> Self {
        match self {
            ScaleMode::Linear => ScaleMode::Log,
            ScaleMode::Log => ScaleMode::Linear,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScaleMode::Linear => "linear",
            ScaleMode::Log => "log10",
        }
    }

    pub fn apply(self, value: f64) -> f64 {
        match self {
            ScaleMode::Linear => value,
            ScaleMode::Log if value <= 0.0 => 0.0,
            ScaleMode::Log => value.log10(),
        }
    }
}

/// Plot data for one frame. X is the probe sequence, Y the scaled latency
/// with lost samples drawn at the dead-timeout sentinel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartSeries {
    pub points: Vec<(f64, f64)>,
    pub lost_points: Vec<(f64, f64)>,
    pub max: f64,
}

impl ChartSeries {
    pub fn build(measurements: &[Measurement], dead_timeout_ms: f64, scale: ScaleMode) -> Self {
        let mut series = ChartSeries {
            points: Vec::with_capacity(measurements.len()),
            ..ChartSeries::default()
        };

        for measurement in measurements {
            let x = measurement.sequence as f64;
            let y = scale.apply(measurement.outcome.plot_value(dead_timeout_ms));
            series.points.push((x, y));
            if measurement.outcome.is_lost() {
                series.lost_points.push((x, y));
            }
            series.max = series.max.max(y);
        }

        series
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
