use std::time::Duration;

use gigmart_engine::locks::{ProcessingLocks, LOCK_MAX_AGE};
use log::*;
use tokio::task::JoinHandle;

/// How often leaked checkout-lock entries are reclaimed. A single timer drives the job, so it
/// never overlaps itself.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(300);

/// Starts the checkout-lock sweeper. Do not await the returned JoinHandle, as it will run
/// indefinitely.
///
/// This is leak-prevention housekeeping only: guards release their entries on drop, and the
/// sweep reclaims strictly by age, so an entry a live request still owns is never touched.
/// Failures here are logged and nothing else.
pub fn start_lock_sweeper(locks: ProcessingLocks) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut timer = tokio::time::interval(SWEEP_INTERVAL);
        info!("🕰️ Checkout lock sweeper started");
        loop {
            timer.tick().await;
            let reclaimed = locks.sweep_stale(LOCK_MAX_AGE);
            if reclaimed > 0 {
                warn!("🕰️ Reclaimed {reclaimed} leaked checkout locks");
            } else {
                debug!("🕰️ No stale checkout locks to reclaim");
            }
        }
    })
}
