//! Wall-clock background pulses.
//!
//! The driver submits [`Command::Pulse`] to the session on a fixed cadence so
//! the settlements keep moving while the player idles. Pulses go through the
//! same request channel as player commands and land in the session trace.
//! The game itself skips pulses while the player is dead.

use std::time::Duration;

use scorn_types::Command;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{info, warn};

use crate::session::SessionHandle;

/// Shortest accepted cadence.
pub const MIN_PERIOD_MS: u64 = 10;

/// Start the driver. It stops when `shutdown` flips to `true` (or its sender
/// is dropped) or when the session is gone. A pulse already submitted is
/// always applied in full by the session.
pub fn spawn_driver(
    session: SessionHandle,
    period_ms: u64,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    let period_ms = period_ms.max(MIN_PERIOD_MS);
    tokio::spawn(async move {
        let mut ticker = time::interval(Duration::from_millis(period_ms));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        ticker.tick().await;
        info!(period_ms, "Background driver started");

        let mut pulses: u64 = 0;
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Err(err) = session.apply(Command::Pulse).await {
                        warn!(error = %err, "Session unavailable, stopping driver");
                        break;
                    }
                    pulses = pulses.saturating_add(1);
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        info!(pulses, "Background driver stopped");
    })
}
