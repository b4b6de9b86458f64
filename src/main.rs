use pingpulse::app::MonitorApp;
use pingpulse::error::AppError;
use pingpulse::logging::init_logging;
use pingpulse::metrics::format_report;
use pingpulse::probe_engine::{ProbeClient, resolve_host};
use pingpulse::runtime::{SharedMonitor, spawn_probe_worker};
use pingpulse::settings::load_from_cli;
use pingpulse::ui::run_ui;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use std::process::ExitCode;
use std::thread;
use std::time::Instant;
use tracing::info;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("pingpulse: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), AppError> {
    let settings = load_from_cli()?;
    if let Some(path) = &settings.log_file {
        init_logging(path).map_err(AppError::Logging)?;
    }

    let address = resolve_host(&settings.host, settings.config.family)?;
    let client = ProbeClient::open(address, settings.config.timeout)?;
    info!(host = %settings.host, %address, "starting monitor");

    let shared = SharedMonitor::new();
    let mut signals = Signals::new([SIGINT, SIGTERM])?;
    let signal_handle = signals.handle();
    let signal_thread = {
        let shared = shared.clone();
        thread::spawn(move || {
            for signal in signals.forever() {
                info!(signal, "termination signal received");
                shared.stop();
            }
        })
    };

    let worker = spawn_probe_worker(client, settings.config.interval, shared.clone())?;
    let mut app = MonitorApp::new(
        settings.config.clone(),
        settings.host.clone(),
        address,
        shared.clone(),
        Instant::now(),
    );
    let ui_result = run_ui(&mut app);

    shared.stop();
    worker.shutdown();
    signal_handle.close();
    let _ = signal_thread.join();
    ui_result?;

    println!("Exiting...");
    let stats = app.final_stats();
    if settings.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!("{}", format_report(&stats, &settings.config));
    }
    info!(total = stats.total, lost = stats.lost_count, "monitor stopped");
    Ok(())
}
