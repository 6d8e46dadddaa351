use crate::peer::RemoteTrack;
use emucast_core::SessionId;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Connected,
    Disconnected,
}

/// Notification raised by the driver.
#[derive(Clone)]
pub enum DriverEvent {
    /// A remote media track arrived.
    Connected(Arc<dyn RemoteTrack>),
    /// The session ended. `session` is `None` when no session had been issued.
    Disconnected { session: Option<SessionId> },
}

impl DriverEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DriverEvent::Connected(_) => EventKind::Connected,
            DriverEvent::Disconnected { .. } => EventKind::Disconnected,
        }
    }
}

impl fmt::Debug for DriverEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverEvent::Connected(track) => f
                .debug_struct("Connected")
                .field("track", &track.id())
                .field("kind", &track.kind())
                .finish(),
            DriverEvent::Disconnected { session } => f
                .debug_struct("Disconnected")
                .field("session", session)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub(crate) type Handler = Arc<dyn Fn(&DriverEvent) + Send + Sync>;

#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, EventKind, Handler)>,
}

impl Listeners {
    pub fn add(&mut self, kind: EventKind, handler: Handler) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, kind, handler));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _, _)| *entry != id);
        self.entries.len() != before
    }

    /// Handlers for `kind` in registration order.
    pub fn snapshot(&self, kind: EventKind) -> Vec<Handler> {
        self.entries
            .iter()
            .filter(|(_, k, _)| *k == kind)
            .map(|(_, _, handler)| handler.clone())
            .collect()
    }
}
