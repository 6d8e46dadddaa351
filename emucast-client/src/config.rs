use std::time::Duration;

/// How inbound JSEP messages are pulled from the emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportMode {
    /// One server-streaming subscription for the whole session.
    #[default]
    Streaming,
    /// Blocking receive calls, re-issued after every response.
    Polling,
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub mode: TransportMode,
    /// Route input over remote-opened data channels when they are open.
    pub data_channels: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            mode: TransportMode::Streaming,
            data_channels: true,
        }
    }
}

/// Connection settings for the emulator gRPC endpoint.
#[derive(Debug, Clone)]
pub struct GrpcConfig {
    pub endpoint: String,
    /// Deadline for unary calls. Long polls and streams are never bounded.
    pub request_timeout: Option<Duration>,
    pub connect_timeout: Duration,
    /// Whether the endpoint serves `receiveJsepMessages` as a server stream.
    pub streaming: bool,
}

impl GrpcConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Endpoint with an `http://` scheme added when none was given.
    pub fn uri(&self) -> String {
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            self.endpoint.clone()
        } else {
            format!("http://{}", self.endpoint)
        }
    }
}

impl Default for GrpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8554".to_owned(),
            request_timeout: Some(Duration::from_secs(10)),
            connect_timeout: Duration::from_secs(5),
            streaming: true,
        }
    }
}
