use crate::probe::Measurement;

/// Append-only measurement series for one session.
///
/// Not synchronised on its own; it lives inside the monitor's shared state
/// lock together with the running flag.
#[derive(Clone, Debug, Default)]
pub struct SeriesStore {
    measurements: Vec<Measurement>,
}

impl SeriesStore {
    pub fn new() -> Self {
        Self {
            measurements: Vec::new(),
        }
    }

    pub fn append(&mut self, measurement: Measurement) {
        debug_assert_eq!(
            measurement.sequence,
            self.measurements.len() as u64 + 1,
            "sequence numbers must be gapless"
        );
        self.measurements.push(measurement);
    }

    pub fn snapshot(&self) -> Vec<Measurement> {
        self.measurements.clone()
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }
}
