//! Stop coordination for the background poll task.

use tokio::sync::broadcast;

/// Cooperative stop signal for a store's poll loop.
///
/// The loop checks the signal once per cycle and exits after finishing
/// the cycle in flight, so a reload that already started completes and
/// a partial snapshot is never published. A closed channel (every
/// sender dropped) counts as a stop, which lets dropping the store
/// retire its task.
#[derive(Debug, Clone)]
pub struct StopSignal {
    tx: broadcast::Sender<()>,
}

impl StopSignal {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Subscribe; each poll task holds its own receiver.
    pub fn subscribe(&self) -> StopReceiver {
        StopReceiver {
            rx: self.tx.subscribe(),
        }
    }

    /// Request the loop to exit after its current cycle.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for StopSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side held by the poll loop.
#[derive(Debug)]
pub struct StopReceiver {
    rx: broadcast::Receiver<()>,
}

impl StopReceiver {
    /// Non-blocking check, run at the top of each cycle.
    pub fn is_stopped(&mut self) -> bool {
        use broadcast::error::TryRecvError;

        match self.rx.try_recv() {
            Ok(()) => true,
            Err(TryRecvError::Closed) => true,
            Err(TryRecvError::Lagged(_)) => true,
            Err(TryRecvError::Empty) => false,
        }
    }

    /// Wait for a stop request. Every outcome means stop: a trigger, a
    /// missed trigger, or a dropped store.
    pub async fn stopped(&mut self) {
        let _ = self.rx.recv().await;
    }
}
