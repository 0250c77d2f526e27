use anyhow::Result;
use pomoclock::prelude::*;
use pomoclock::ENGINE_NAME;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Number of tasks queued before the session starts.
const SEEDED_TASKS: i64 = 3;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // 2. Load the session configuration. The first argument names an optional
    //    TOML file; POMO_* variables override it.
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = PomodoroConfig::load(config_path.as_deref())?;
    info!(?config, "Configuration loaded.");

    // 3. Create the scheduler and route notifications into the log.
    let scheduler = IntervalScheduler::new(config)?;
    scheduler
        .set_notifier(|text| info!("[NOTIFY] => {}", text))
        .await;

    // 4. Listen to the typed event stream.
    spawn_event_listener(&scheduler);

    // 5. Queue some work and start the first round.
    for id in 0..SEEDED_TASKS {
        scheduler.add_task(id).await;
    }
    scheduler.start().await?;

    // 6. Run until Ctrl+C, then tear down.
    info!("{} running. Press Ctrl+C to shut down.", ENGINE_NAME);
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received.");
    scheduler.shutdown().await;

    Ok(())
}

/// Logs interval transitions from the scheduler's event stream.
fn spawn_event_listener(scheduler: &IntervalScheduler) {
    let mut event_rx = scheduler.subscribe_events();
    tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            match event {
                SchedulerEvent::RoundStarted { round, duration } => {
                    info!("[EVENT] => Round #{} for {:?}", round, duration)
                }
                SchedulerEvent::BreakStarted {
                    round,
                    long: true,
                    duration,
                } => info!("[EVENT] => Long break after round #{} for {:?}", round, duration),
                SchedulerEvent::BreakStarted {
                    round, duration, ..
                } => info!("[EVENT] => Break after round #{} for {:?}", round, duration),
                _ => {}
            }
        }
    });
}
