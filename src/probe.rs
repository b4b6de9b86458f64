use serde::Serialize;

/// Why a probe cycle produced no latency.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LossCause {
    Timeout,
    SendFailed,
    RecvFailed,
    Malformed,
    UnexpectedType,
    BuildFailed,
}

impl LossCause {
    pub fn label(&self) -> &'static str {
        match self {
            LossCause::Timeout => "timeout",
            LossCause::SendFailed => "send_failed",
            LossCause::RecvFailed => "recv_failed",
            LossCause::Malformed => "malformed",
            LossCause::UnexpectedType => "unexpected_type",
            LossCause::BuildFailed => "build_failed",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Round-trip time in milliseconds.
    Latency(f64),
    Lost(LossCause),
}

impl Outcome {
    pub fn latency_ms(&self) -> Option<f64> {
        match self {
            Outcome::Latency(ms) => Some(*ms),
            Outcome::Lost(_) => None,
        }
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, Outcome::Lost(_))
    }

    /// Value plotted for this outcome: the latency, or the dead-timeout
    /// sentinel for a lost sample.
    pub fn plot_value(&self, dead_timeout_ms: f64) -> f64 {
        self.latency_ms().unwrap_or(dead_timeout_ms)
    }
}

/// One probe cycle. Sequence numbers start at 1 and are gapless.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Measurement {
    pub sequence: u64,
    pub outcome: Outcome,
}

impl Measurement {
    pub fn latency(sequence: u64, ms: f64) -> Self {
        Self {
            sequence,
            outcome: Outcome::Latency(ms),
        }
    }

    pub fn lost(sequence: u64, cause: LossCause) -> Self {
        Self {
            sequence,
            outcome: Outcome::Lost(cause),
        }
    }
}
