use crate::config::GrpcConfig;
use crate::error::TransportError;
use crate::status::StatusSource;
use crate::transport::{Authenticator, SignalStream, Transport};
use async_trait::async_trait;
use emucast_core::proto::{EmulatorStatus, JsepMsg, RtcId};
use emucast_core::{InputEvent, SessionId};
use futures::StreamExt;
use std::sync::Arc;
use tonic::client::Grpc;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::metadata::{Ascii, MetadataKey, MetadataValue};
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request, Response, Status};
use tonic_prost::ProstCodec;
use tracing::{debug, info};

const REQUEST_RTC_STREAM: &str = "/android.emulation.control.Rtc/requestRtcStream";
const SEND_JSEP_MESSAGE: &str = "/android.emulation.control.Rtc/sendJsepMessage";
const RECEIVE_JSEP_MESSAGE: &str = "/android.emulation.control.Rtc/receiveJsepMessage";
const RECEIVE_JSEP_MESSAGES: &str = "/android.emulation.control.Rtc/receiveJsepMessages";
const SEND_MOUSE: &str = "/android.emulation.control.EmulatorController/sendMouse";
const SEND_KEY: &str = "/android.emulation.control.EmulatorController/sendKey";
const SEND_TOUCH: &str = "/android.emulation.control.EmulatorController/sendTouch";
const GET_STATUS: &str = "/android.emulation.control.EmulatorController/getStatus";

/// Emulator gRPC endpoint: JSEP relay, input fallback and status.
#[derive(Clone)]
pub struct GrpcTransport {
    channel: Channel,
    config: GrpcConfig,
    auth: Arc<dyn Authenticator>,
}

impl GrpcTransport {
    pub async fn connect(
        config: GrpcConfig,
        auth: Arc<dyn Authenticator>,
    ) -> Result<Self, TransportError> {
        let endpoint = Self::endpoint(&config)?;
        let channel = endpoint
            .connect()
            .await
            .map_err(|e| TransportError::Connect(format!("{}: {}", config.uri(), e)))?;
        info!("Connected to emulator at {}", config.uri());
        Ok(Self {
            channel,
            config,
            auth,
        })
    }

    /// Defers connecting until the first call.
    pub fn connect_lazy(
        config: GrpcConfig,
        auth: Arc<dyn Authenticator>,
    ) -> Result<Self, TransportError> {
        let channel = Self::endpoint(&config)?.connect_lazy();
        Ok(Self {
            channel,
            config,
            auth,
        })
    }

    fn endpoint(config: &GrpcConfig) -> Result<Endpoint, TransportError> {
        let uri = config.uri();
        let endpoint =
            Endpoint::from_shared(uri.clone()).map_err(|e| TransportError::InvalidEndpoint {
                endpoint: uri,
                reason: e.to_string(),
            })?;
        Ok(endpoint.connect_timeout(config.connect_timeout))
    }

    fn request<M>(&self, message: M, bounded: bool) -> Result<Request<M>, TransportError> {
        let mut request = Request::new(message);

        for (key, value) in self.auth.auth_header() {
            let name = MetadataKey::<Ascii>::from_bytes(key.to_ascii_lowercase().as_bytes())
                .map_err(|_| TransportError::InvalidMetadata(key.clone()))?;
            let value: MetadataValue<Ascii> = value
                .parse()
                .map_err(|_| TransportError::InvalidMetadata(key.clone()))?;
            request.metadata_mut().insert(name, value);
        }

        if bounded && let Some(timeout) = self.config.request_timeout {
            request.set_timeout(timeout);
        }
        Ok(request)
    }

    async fn ready(&self) -> Result<Grpc<Channel>, TransportError> {
        let mut grpc = Grpc::new(self.channel.clone());
        grpc.ready()
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        Ok(grpc)
    }

    async fn unary<M, R>(
        &self,
        path: &'static str,
        message: M,
        bounded: bool,
    ) -> Result<R, TransportError>
    where
        M: prost::Message + Send + Sync + 'static,
        R: prost::Message + Default + Send + Sync + 'static,
    {
        let request = self.request(message, bounded)?;
        let mut grpc = self.ready().await?;
        let codec: ProstCodec<M, R> = ProstCodec::default();

        grpc.unary(request, PathAndQuery::from_static(path), codec)
            .await
            .map(Response::into_inner)
            .map_err(|status| rpc_error(self.auth.as_ref(), path, status))
    }
}

fn rpc_error(auth: &dyn Authenticator, method: &'static str, status: Status) -> TransportError {
    if status.code() == Code::Unauthenticated {
        auth.unauthorized();
    }
    TransportError::Rpc {
        method,
        code: status.code(),
        message: status.message().to_owned(),
    }
}

fn rtc_id(session: &SessionId) -> RtcId {
    RtcId {
        guid: session.as_str().to_owned(),
    }
}

#[async_trait]
impl Transport for GrpcTransport {
    async fn request_session(&self) -> Result<SessionId, TransportError> {
        let id: RtcId = self.unary(REQUEST_RTC_STREAM, (), true).await?;
        Ok(SessionId::new(id.guid))
    }

    async fn send_signal(
        &self,
        session: &SessionId,
        message: String,
    ) -> Result<(), TransportError> {
        let msg = JsepMsg {
            id: Some(rtc_id(session)),
            message,
        };
        self.unary::<_, ()>(SEND_JSEP_MESSAGE, msg, true).await
    }

    async fn receive_signal(&self, session: &SessionId) -> Result<Option<String>, TransportError> {
        let msg: JsepMsg = self
            .unary(RECEIVE_JSEP_MESSAGE, rtc_id(session), false)
            .await?;
        Ok(Some(msg.message).filter(|m| !m.is_empty()))
    }

    async fn subscribe_signals(&self, session: &SessionId) -> Result<SignalStream, TransportError> {
        let request = self.request(rtc_id(session), false)?;
        let mut grpc = self.ready().await?;
        let codec: ProstCodec<RtcId, JsepMsg> = ProstCodec::default();

        let stream = grpc
            .server_streaming(request, PathAndQuery::from_static(RECEIVE_JSEP_MESSAGES), codec)
            .await
            .map_err(|status| rpc_error(self.auth.as_ref(), RECEIVE_JSEP_MESSAGES, status))?
            .into_inner();
        debug!("Subscribed to JSEP stream for session {}", session);

        let auth = self.auth.clone();
        Ok(stream
            .map(move |item| {
                item.map(|msg| msg.message)
                    .map_err(|status| rpc_error(auth.as_ref(), RECEIVE_JSEP_MESSAGES, status))
            })
            .boxed())
    }

    async fn send_input(&self, event: InputEvent) -> Result<(), TransportError> {
        match event {
            InputEvent::Mouse(ev) => self.unary::<_, ()>(SEND_MOUSE, ev, true).await,
            InputEvent::Keyboard(ev) => self.unary::<_, ()>(SEND_KEY, ev, true).await,
            InputEvent::Touch(ev) => self.unary::<_, ()>(SEND_TOUCH, ev, true).await,
        }
    }

    fn supports_streaming(&self) -> bool {
        self.config.streaming
    }
}

#[async_trait]
impl StatusSource for GrpcTransport {
    async fn fetch_status(&self) -> Result<EmulatorStatus, TransportError> {
        self.unary(GET_STATUS, (), true).await
    }
}
