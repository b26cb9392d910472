//! Thread-backed one-shot timer.
//!
//! The host equivalent of a hardware delay timer: a dedicated thread waits
//! out the armed delay and invokes the fire callback. `arm` is a channel
//! send, so the caller (zero-cross context) never blocks.
//!
//! Safety: each `ThreadOneShot` spawns exactly one thread that is shut down
//! when the handle is dropped, preventing thread leaks.

use crossbeam_channel as xch;
use dimmer_traits::OneShot;
use std::time::{Duration, Instant};

pub struct ThreadOneShot {
    tx: Option<xch::Sender<Instant>>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl ThreadOneShot {
    /// Spawn the timer thread. `fire` runs on that thread each time an armed
    /// delay elapses; it should finish well within a half-cycle.
    pub fn spawn<F>(mut fire: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (tx, rx) = xch::unbounded::<Instant>();

        let join_handle = std::thread::spawn(move || {
            let mut pending: Option<Instant> = None;
            loop {
                match pending {
                    // Idle: block until the next arm, or exit when the
                    // handle is gone.
                    None => match rx.recv() {
                        Ok(deadline) => pending = Some(deadline),
                        Err(_) => break,
                    },
                    Some(deadline) => {
                        let now = Instant::now();
                        if now >= deadline {
                            fire();
                            pending = None;
                            continue;
                        }
                        // Wait out the delay, but let a newer arm replace the
                        // pending deadline (latest-arm-wins).
                        match rx.recv_timeout(deadline - now) {
                            Ok(newer) => pending = Some(newer),
                            Err(xch::RecvTimeoutError::Timeout) => {
                                fire();
                                pending = None;
                            }
                            Err(xch::RecvTimeoutError::Disconnected) => break,
                        }
                    }
                }
            }
            tracing::trace!("one-shot timer thread exiting cleanly");
        });

        Self {
            tx: Some(tx),
            join_handle: Some(join_handle),
        }
    }
}

impl OneShot for ThreadOneShot {
    fn arm(&mut self, delay: Duration) {
        // The deadline is fixed here so channel latency does not stretch it.
        if let Some(tx) = &self.tx {
            let _ = tx.send(Instant::now() + delay);
        }
    }
}

impl Drop for ThreadOneShot {
    fn drop(&mut self) {
        // Disconnect the channel; the thread observes it on its next recv.
        drop(self.tx.take());
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => tracing::trace!("one-shot timer thread joined"),
                Err(e) => tracing::warn!(?e, "one-shot timer thread panicked during shutdown"),
            }
        }
    }
}
