//! Client side of the emulator's WebRTC signaling.
//!
//! [`SignalingDriver`] negotiates a peer connection with the emulator over a
//! [`Transport`] and routes input events through [`DataChannelRouter`].

mod config;
mod driver;
mod error;
mod events;
pub mod peer;
mod router;
mod status;
pub mod transport;

pub use config::{DriverConfig, GrpcConfig, TransportMode};
pub use driver::{DriverState, SignalingDriver};
pub use error::{ClientError, PeerError, TransportError};
pub use events::{DriverEvent, EventKind, ListenerId};
pub use router::{DataChannelRouter, Delivery, send_fallback};
pub use status::{StatusMonitor, StatusSource};
pub use transport::{GrpcTransport, SignalStream, Transport};
