mod input;
mod session;
mod signaling;
mod status;

pub use input::{InputEvent, InputKind, UnknownInputLabel};
pub use session::SessionId;
pub use signaling::{
    IceCandidate, IceServerConfig, PeerConnectionConfig, SdpType, SessionDescription,
    SignalError, SignalMessage,
};
pub use status::{StatusReport, VmConfig};
