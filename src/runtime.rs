use crate::features::metrics::aggregate::SeriesStore;
use crate::features::probe::engine::{IcmpTransport, ProbeClient};
use crate::probe::{LossCause, Measurement};
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{error, info};

#[derive(Clone, Debug)]
pub enum ControlMessage {
    Stop,
}

#[derive(Debug)]
struct MonitorState {
    running: bool,
    series: SeriesStore,
    fault: Option<String>,
}

/// State shared by the probe thread and the render loop. One lock covers
/// the running flag, the series and the engine fault.
#[derive(Clone, Debug)]
pub struct SharedMonitor {
    inner: Arc<Mutex<MonitorState>>,
}

/// Consistent copy of the shared state taken under the lock.
#[derive(Clone, Debug)]
pub struct MonitorSnapshot {
    pub running: bool,
    pub measurements: Vec<Measurement>,
    pub fault: Option<String>,
}

impl SharedMonitor {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MonitorState {
                running: true,
                series: SeriesStore::new(),
                fault: None,
            })),
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock().running
    }

    /// Clears the running flag. Returns whether it was still set.
    pub fn stop(&self) -> bool {
        let mut state = self.inner.lock();
        std::mem::replace(&mut state.running, false)
    }

    pub fn record(&self, measurement: Measurement) {
        self.inner.lock().series.append(measurement);
    }

    pub fn record_fault(&self, fault: String) {
        self.inner.lock().fault = Some(fault);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn snapshot(&self) -> MonitorSnapshot {
        let state = self.inner.lock();
        MonitorSnapshot {
            running: state.running,
            measurements: state.series.snapshot(),
            fault: state.fault.clone(),
        }
    }
}

impl Default for SharedMonitor {
    fn default() -> Self {
        Self::new()
    }
}

pub struct WorkerHandle {
    pub sender: Sender<ControlMessage>,
    pub join: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    /// Wakes the probe thread and waits for it to release its socket.
    pub fn shutdown(mut self) {
        let _ = self.sender.send(ControlMessage::Stop);
        if let Some(join) = self.join.take()
            && join.join().is_err()
        {
            error!("probe thread panicked");
        }
    }
}

pub fn spawn_probe_worker<T>(
    client: ProbeClient<T>,
    interval: Duration,
    shared: SharedMonitor,
) -> std::io::Result<WorkerHandle>
where
    T: IcmpTransport + 'static,
{
    let (tx, rx) = crossbeam_channel::unbounded();
    let join = thread::Builder::new()
        .name("probe".to_string())
        .spawn(move || run_worker(client, interval, shared, rx))?;
    Ok(WorkerHandle {
        sender: tx,
        join: Some(join),
    })
}

fn run_worker<T: IcmpTransport>(
    mut client: ProbeClient<T>,
    interval: Duration,
    shared: SharedMonitor,
    control_rx: Receiver<ControlMessage>,
) {
    info!(address = %client.target(), "probe engine started");
    let mut sequence = 0u64;

    loop {
        if !shared.is_running() {
            break;
        }

        sequence += 1;
        match client.probe(sequence) {
            Ok(outcome) => shared.record(Measurement { sequence, outcome }),
            Err(err) => {
                error!(error = %err, "probe engine halted");
                shared.record(Measurement::lost(sequence, LossCause::BuildFailed));
                shared.record_fault(err.to_string());
                break;
            }
        }

        match control_rx.recv_timeout(interval) {
            Ok(ControlMessage::Stop) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }
    }

    info!(probes = sequence, "probe engine stopped");
}

#[cfg(test)]
mod tests {
    use super::{SharedMonitor, spawn_probe_worker};
    use crate::features::probe::engine::ProbeClient;
    use crate::features::probe::engine::SocketKind;
    use crate::features::probe::engine::testing::{ScriptedTransport, Step};
    use crate::probe::{LossCause, Measurement, Outcome};
    use std::net::{IpAddr, Ipv4Addr};
    use std::thread;
    use std::time::{Duration, Instant};

    const TARGET: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));

    fn timeout_client() -> ProbeClient<ScriptedTransport> {
        let transport = ScriptedTransport::new(SocketKind::Dgram, Vec::<Step>::new());
        ProbeClient::with_transport(transport, TARGET, Duration::from_millis(1))
    }

    #[test]
    fn stop_clears_flag_once() {
        let shared = SharedMonitor::new();
        assert!(shared.is_running());
        assert!(shared.stop());
        assert!(!shared.stop());
        assert!(!shared.snapshot().running);
    }

    #[test]
    fn worker_records_gapless_sequences_and_stops() {
        let shared = SharedMonitor::new();
        let worker =
            spawn_probe_worker(timeout_client(), Duration::from_millis(1), shared.clone())
                .expect("spawn");

        let started = Instant::now();
        while shared.len() < 5 && started.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(5));
        }
        shared.stop();
        worker.shutdown();

        let snapshot = shared.snapshot();
        assert!(snapshot.measurements.len() >= 5);
        for (i, measurement) in snapshot.measurements.iter().enumerate() {
            assert_eq!(measurement.sequence, i as u64 + 1);
            assert_eq!(measurement.outcome, Outcome::Lost(LossCause::Timeout));
        }
        assert!(snapshot.fault.is_none());
    }

    #[test]
    fn cleared_flag_stops_probing_within_one_interval() {
        let shared = SharedMonitor::new();
        let worker =
            spawn_probe_worker(timeout_client(), Duration::from_millis(20), shared.clone())
                .expect("spawn");

        let started = Instant::now();
        while shared.is_empty() && started.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(1));
        }
        shared.stop();
        // give the engine one interval plus one probe budget to notice
        thread::sleep(Duration::from_millis(60));
        let settled = shared.len();
        thread::sleep(Duration::from_millis(100));
        assert_eq!(shared.len(), settled);

        worker.shutdown();
    }

    #[test]
    fn stop_message_wakes_a_sleeping_worker() {
        let shared = SharedMonitor::new();
        let worker =
            spawn_probe_worker(timeout_client(), Duration::from_secs(60), shared.clone())
                .expect("spawn");

        let started = Instant::now();
        while shared.is_empty() && started.elapsed() < Duration::from_secs(5) {
            thread::sleep(Duration::from_millis(1));
        }
        shared.stop();
        let shutdown_started = Instant::now();
        worker.shutdown();
        assert!(shutdown_started.elapsed() < Duration::from_secs(5));
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn concurrent_snapshots_never_shrink_or_tear() {
        let shared = SharedMonitor::new();
        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for sequence in 1..=2_000u64 {
                    if sequence % 3 == 0 {
                        shared.record(Measurement::lost(sequence, LossCause::Timeout));
                    } else {
                        shared.record(Measurement::latency(sequence, sequence as f64));
                    }
                }
            })
        };

        let mut last_len = 0;
        while last_len < 2_000 {
            let snapshot = shared.snapshot();
            assert!(snapshot.measurements.len() >= last_len);
            for (i, measurement) in snapshot.measurements.iter().enumerate() {
                let sequence = i as u64 + 1;
                assert_eq!(measurement.sequence, sequence);
                match measurement.outcome {
                    Outcome::Lost(_) => assert_eq!(sequence % 3, 0),
                    Outcome::Latency(ms) => assert_eq!(ms, sequence as f64),
                }
            }
            last_len = snapshot.measurements.len();
        }

        writer.join().expect("writer");
    }
}
