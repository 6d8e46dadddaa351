pub use emucast_core::{InputEvent, InputKind, SessionId, SignalMessage};

pub mod model {
    pub use emucast_core::model::*;
}

pub mod proto {
    pub use emucast_core::proto::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use emucast_client::*;
}
