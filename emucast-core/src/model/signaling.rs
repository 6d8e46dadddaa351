use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

const TAGS: [&str; 4] = ["start", "sdp", "bye", "candidate"];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IceServerConfig {
    #[serde(default, deserialize_with = "one_or_many")]
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

/// Peer connection configuration carried by the `start` message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerConnectionConfig {
    #[serde(default)]
    pub ice_servers: Vec<IceServerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ice_transport_policy: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Answer,
    Pranswer,
    Rollback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDescription {
    #[serde(rename = "type")]
    pub sdp_type: SdpType,
    pub sdp: String,
}

impl SessionDescription {
    pub fn offer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Offer,
            sdp: sdp.into(),
        }
    }

    pub fn answer(sdp: impl Into<String>) -> Self {
        Self {
            sdp_type: SdpType::Answer,
            sdp: sdp.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IceCandidate {
    #[serde(default)]
    pub candidate: String,
    #[serde(rename = "sdpMid", default)]
    pub sdp_mid: Option<String>,
    #[serde(rename = "sdpMLineIndex", default)]
    pub sdp_mline_index: Option<u16>,
    #[serde(
        rename = "usernameFragment",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub username_fragment: Option<String>,
}

impl IceCandidate {
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
            ..Default::default()
        }
    }

    /// An empty candidate marks the end of trickled candidates.
    pub fn is_end_of_candidates(&self) -> bool {
        self.candidate.trim().is_empty()
    }
}

#[derive(Debug, Error)]
pub enum SignalError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("signal is not a JSON object")]
    NotAnObject,

    #[error("signal carries none of start/sdp/bye/candidate")]
    Unrecognized,

    #[error("signal carries more than one tag: {0}")]
    Ambiguous(String),

    #[error("malformed '{tag}' signal: {reason}")]
    Malformed { tag: &'static str, reason: String },
}

/// A JSEP message exchanged with the emulator.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalMessage {
    Start(PeerConnectionConfig),
    Sdp(SessionDescription),
    IceCandidate(IceCandidate),
    Bye,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Outbound<'a> {
    Start(&'a PeerConnectionConfig),
    Sdp(&'a SessionDescription),
    Candidate(&'a IceCandidate),
    Bye(bool),
}

impl SignalMessage {
    /// Parses the JSON text of an inbound message.
    ///
    /// Accepts the nested form (`{"sdp": {"type": .., "sdp": ..}}`) as well as
    /// the flat form where the description or candidate fields sit next to the
    /// tag.
    pub fn parse(text: &str) -> Result<Self, SignalError> {
        let Value::Object(mut object) = serde_json::from_str::<Value>(text)? else {
            return Err(SignalError::NotAnObject);
        };

        let present: Vec<&str> = TAGS
            .iter()
            .copied()
            .filter(|tag| object.get(*tag).is_some_and(is_set))
            .collect();

        let tag = match present.as_slice() {
            [tag] => *tag,
            [] => return Err(SignalError::Unrecognized),
            _ => return Err(SignalError::Ambiguous(present.join(","))),
        };

        match tag {
            "start" => Self::parse_start(&mut object),
            "sdp" => Self::parse_sdp(object),
            "candidate" => Self::parse_candidate(object),
            _ => Ok(SignalMessage::Bye),
        }
    }

    /// Serializes in the nested form expected by the emulator.
    pub fn to_json(&self) -> Result<String, SignalError> {
        let outbound = match self {
            SignalMessage::Start(config) => Outbound::Start(config),
            SignalMessage::Sdp(desc) => Outbound::Sdp(desc),
            SignalMessage::IceCandidate(candidate) => Outbound::Candidate(candidate),
            SignalMessage::Bye => Outbound::Bye(true),
        };
        Ok(serde_json::to_string(&outbound)?)
    }

    fn parse_start(object: &mut Map<String, Value>) -> Result<Self, SignalError> {
        match object.remove("start") {
            Some(value @ Value::Object(_)) => Ok(SignalMessage::Start(
                serde_json::from_value(value).map_err(|e| malformed("start", e))?,
            )),
            other => Err(malformed("start", format!("expected object, got {other:?}"))),
        }
    }

    fn parse_sdp(mut object: Map<String, Value>) -> Result<Self, SignalError> {
        let desc = match object.remove("sdp") {
            Some(value @ Value::Object(_)) => {
                serde_json::from_value(value).map_err(|e| malformed("sdp", e))?
            }
            Some(Value::String(sdp)) => {
                let sdp_type = object
                    .remove("type")
                    .ok_or_else(|| malformed("sdp", "missing type"))?;
                SessionDescription {
                    sdp_type: serde_json::from_value(sdp_type).map_err(|e| malformed("sdp", e))?,
                    sdp,
                }
            }
            other => return Err(malformed("sdp", format!("unexpected value {other:?}"))),
        };
        Ok(SignalMessage::Sdp(desc))
    }

    fn parse_candidate(mut object: Map<String, Value>) -> Result<Self, SignalError> {
        let candidate = match object.remove("candidate") {
            None => IceCandidate::default(),
            Some(value @ Value::Object(_)) => {
                serde_json::from_value(value).map_err(|e| malformed("candidate", e))?
            }
            Some(Value::String(inner)) if inner.trim_start().starts_with('{') => {
                serde_json::from_str(&inner).map_err(|e| malformed("candidate", e))?
            }
            Some(Value::String(line)) => {
                object.insert("candidate".to_owned(), Value::String(line));
                serde_json::from_value(Value::Object(object))
                    .map_err(|e| malformed("candidate", e))?
            }
            Some(other) => {
                return Err(malformed("candidate", format!("unexpected value {other}")));
            }
        };
        Ok(SignalMessage::IceCandidate(candidate))
    }
}

/// `null` and `false` leave a tag unset.
fn is_set(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

fn malformed(tag: &'static str, reason: impl ToString) -> SignalError {
    SignalError::Malformed {
        tag,
        reason: reason.to_string(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(url) => vec![url],
        OneOrMany::Many(urls) => urls,
    })
}
