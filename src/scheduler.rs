//! Fixed-interval tick loop.
//!
//! Runs the job once per interval, starting one full interval after launch.
//! Each run is awaited before the next tick is taken, so runs never overlap;
//! a run that overshoots the interval delays the next one instead of
//! queueing a burst. Failed ticks are reported and skipped. There are no
//! retries: the next tick is the retry.

use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::pipeline::TickReport;

/// Tick outcome counters returned when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub succeeded: u64,
    pub failed: u64,
}

/// Invokes `job` every `every` until `shutdown` resolves.
///
/// Shutdown is observed between ticks; a run in progress is always
/// completed first.
pub async fn run<J, Fut, S>(every: Duration, mut job: J, shutdown: S) -> TickStats
where
    J: FnMut() -> Fut,
    Fut: Future<Output = crate::Result<TickReport>>,
    S: Future<Output = ()>,
{
    let mut interval = tokio::time::interval_at(Instant::now() + every, every);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    let mut stats = TickStats::default();
    info!(interval_secs = every.as_secs_f64(), "Scheduler started");

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!(
                    succeeded = stats.succeeded,
                    failed = stats.failed,
                    "Shutdown requested, scheduler stopped"
                );
                break;
            }
            _ = interval.tick() => {
                match job().await {
                    Ok(report) => {
                        stats.succeeded += 1;
                        report_success(&report);
                    }
                    Err(e) => {
                        stats.failed += 1;
                        warn!(kind = e.kind().as_str(), error = %e, "Tick failed, skipping");
                    }
                }
            }
        }
    }

    stats
}

fn report_success(report: &TickReport) {
    if report.gainers == 0 {
        info!(captured_at = %report.captured_at, "No gainers in snapshot");
    } else {
        info!(
            gainers = report.gainers,
            rows_appended = report.rows_appended,
            captured_at = %report.captured_at,
            "Top gainers recorded"
        );
    }
}
