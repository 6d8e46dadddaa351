use crate::DriverState;
use emucast_core::SignalError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("{method} failed with {code:?}: {message}")]
    Rpc {
        method: &'static str,
        code: tonic::Code,
        message: String,
    },

    #[error("invalid auth metadata '{0}'")]
    InvalidMetadata(String),

    #[error("transport closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum PeerError {
    #[error(transparent)]
    Webrtc(#[from] webrtc::Error),

    #[error("unsupported session description: {0}")]
    Unsupported(&'static str),

    #[error("{0}")]
    Other(String),
}

/// Errors returned from the driver's public API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("operation not valid in state {0:?}")]
    InvalidState(DriverState),

    #[error("session was torn down before it started")]
    Cancelled,

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Signal(#[from] SignalError),
}
