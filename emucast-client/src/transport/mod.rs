mod auth;
mod grpc;

pub use auth::{Authenticator, BearerToken, NopAuthenticator};
pub use grpc::GrpcTransport;

use crate::error::TransportError;
use async_trait::async_trait;
use emucast_core::{InputEvent, SessionId};
use futures::stream::BoxStream;

pub type SignalStream = BoxStream<'static, Result<String, TransportError>>;

/// Message relay between the driver and the emulator.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn request_session(&self) -> Result<SessionId, TransportError>;

    async fn send_signal(&self, session: &SessionId, message: String)
    -> Result<(), TransportError>;

    /// Blocks until messages are available. `None` when the server answered
    /// without a message.
    async fn receive_signal(&self, session: &SessionId) -> Result<Option<String>, TransportError>;

    async fn subscribe_signals(&self, session: &SessionId) -> Result<SignalStream, TransportError>;

    async fn send_input(&self, event: InputEvent) -> Result<(), TransportError>;

    fn supports_streaming(&self) -> bool {
        true
    }
}
