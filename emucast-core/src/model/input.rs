use crate::proto::{KeyboardEvent, MouseEvent, TouchEvent};
use bytes::Bytes;
use prost::Message;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Logical input stream; doubles as the data channel label.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum InputKind {
    Mouse,
    Keyboard,
    Touch,
}

impl InputKind {
    pub const ALL: [InputKind; 3] = [InputKind::Mouse, InputKind::Keyboard, InputKind::Touch];

    pub fn label(self) -> &'static str {
        match self {
            InputKind::Mouse => "mouse",
            InputKind::Keyboard => "keyboard",
            InputKind::Touch => "touch",
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Error)]
#[error("no input stream is labelled '{0}'")]
pub struct UnknownInputLabel(pub String);

impl FromStr for InputKind {
    type Err = UnknownInputLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InputKind::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| UnknownInputLabel(s.to_owned()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Mouse(MouseEvent),
    Keyboard(KeyboardEvent),
    Touch(TouchEvent),
}

impl InputEvent {
    pub fn kind(&self) -> InputKind {
        match self {
            InputEvent::Mouse(_) => InputKind::Mouse,
            InputEvent::Keyboard(_) => InputKind::Keyboard,
            InputEvent::Touch(_) => InputKind::Touch,
        }
    }

    /// Protobuf encoding, as written to a data channel.
    pub fn encode(&self) -> Bytes {
        let bytes = match self {
            InputEvent::Mouse(ev) => ev.encode_to_vec(),
            InputEvent::Keyboard(ev) => ev.encode_to_vec(),
            InputEvent::Touch(ev) => ev.encode_to_vec(),
        };
        Bytes::from(bytes)
    }
}

impl From<MouseEvent> for InputEvent {
    fn from(ev: MouseEvent) -> Self {
        InputEvent::Mouse(ev)
    }
}

impl From<KeyboardEvent> for InputEvent {
    fn from(ev: KeyboardEvent) -> Self {
        InputEvent::Keyboard(ev)
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(ev: TouchEvent) -> Self {
        InputEvent::Touch(ev)
    }
}
