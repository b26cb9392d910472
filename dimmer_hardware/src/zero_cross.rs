//! Simulated zero-crossing source.
//!
//! Emits edges at the mains half-cycle cadence from a paced thread, standing
//! in for the optocoupler input when running without hardware. Pacing is
//! against absolute deadlines so jitter does not accumulate into drift.
//!
//! Safety: each `ZeroCrossTicker` spawns exactly one thread that is shut
//! down when the handle is dropped, preventing thread leaks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

pub struct ZeroCrossTicker {
    shutdown: Arc<AtomicBool>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl ZeroCrossTicker {
    /// Spawn the edge source. `on_edge` runs on the ticker thread every
    /// `half_cycle_us` microseconds until the ticker is dropped.
    pub fn spawn<F>(half_cycle_us: u32, mut on_edge: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let period = std::time::Duration::from_micros(u64::from(half_cycle_us));
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let join_handle = std::thread::spawn(move || {
            let mut next = Instant::now() + period;
            loop {
                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }
                let now = Instant::now();
                if now < next {
                    std::thread::sleep(next - now);
                }
                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }
                on_edge();
                // Absolute pacing; skip forward if the callback overran.
                next += period;
                let now = Instant::now();
                if next < now {
                    next = now + period;
                }
            }
            tracing::trace!("zero-cross ticker thread exiting cleanly");
        });

        Self {
            shutdown,
            join_handle: Some(join_handle),
        }
    }
}

impl Drop for ZeroCrossTicker {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => tracing::trace!("zero-cross ticker thread joined"),
                Err(e) => tracing::warn!(?e, "zero-cross ticker thread panicked during shutdown"),
            }
        }
    }
}
