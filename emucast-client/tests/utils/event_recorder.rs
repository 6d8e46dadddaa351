use emucast_client::{DriverEvent, EventKind, SignalingDriver, Transport};
use emucast_core::SessionId;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Driver notification as seen by a listener.
#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Connected { track: String },
    Disconnected { session: Option<SessionId> },
}

/// Listener recording every driver event in delivery order.
#[derive(Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl EventRecorder {
    /// Registers the recorder for both event kinds on `driver`.
    pub fn attach<T: Transport>(driver: &SignalingDriver<T>) -> Self {
        let recorder = Self::default();
        for kind in [EventKind::Connected, EventKind::Disconnected] {
            let events = recorder.events.clone();
            driver.on(kind, move |event| {
                let recorded = match event {
                    DriverEvent::Connected(track) => Recorded::Connected { track: track.id() },
                    DriverEvent::Disconnected { session } => Recorded::Disconnected {
                        session: session.clone(),
                    },
                };
                events.lock().unwrap().push(recorded);
            });
        }
        recorder
    }

    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub fn connected_count(&self) -> usize {
        self.count(|e| matches!(e, Recorded::Connected { .. }))
    }

    pub fn disconnected_count(&self) -> usize {
        self.count(|e| matches!(e, Recorded::Disconnected { .. }))
    }

    fn count(&self, pred: impl Fn(&Recorded) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }

    /// Wait for at least `count` disconnect events with timeout.
    pub async fn wait_for_disconnects(&self, count: usize, timeout_ms: u64) -> bool {
        self.wait(timeout_ms, || self.disconnected_count() >= count)
            .await
    }

    /// Wait for at least `count` connect events with timeout.
    pub async fn wait_for_connects(&self, count: usize, timeout_ms: u64) -> bool {
        self.wait(timeout_ms, || self.connected_count() >= count).await
    }

    async fn wait(&self, timeout_ms: u64, done: impl Fn() -> bool) -> bool {
        let start = Instant::now();
        let timeout = Duration::from_millis(timeout_ms);

        loop {
            if done() {
                return true;
            }
            if start.elapsed() > timeout {
                return false;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}
