//! Messages of the emulator's `android.emulation.control` gRPC package.
//!
//! Only the subset used by the client is declared; field tags follow
//! `emulator_controller.proto` and `rtc_service.proto`.

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RtcId {
    #[prost(string, tag = "1")]
    pub guid: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct JsepMsg {
    #[prost(message, optional, tag = "1")]
    pub id: ::core::option::Option<RtcId>,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct MouseEvent {
    #[prost(int32, tag = "1")]
    pub x: i32,
    #[prost(int32, tag = "2")]
    pub y: i32,
    /// Bit mask of pressed buttons: 1 = left, 2 = right.
    #[prost(int32, tag = "3")]
    pub buttons: i32,
    #[prost(int32, tag = "4")]
    pub display: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum KeyCodeType {
    Usb = 0,
    Evdev = 1,
    Xkb = 2,
    Win = 3,
    Mac = 4,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum KeyEventType {
    Keydown = 0,
    Keyup = 1,
    Keypress = 2,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct KeyboardEvent {
    #[prost(enumeration = "KeyCodeType", tag = "1")]
    pub code_type: i32,
    #[prost(enumeration = "KeyEventType", tag = "2")]
    pub event_type: i32,
    #[prost(int32, tag = "3")]
    pub key_code: i32,
    /// DOM `KeyboardEvent.key` value, e.g. `"Enter"` or `"a"`.
    #[prost(string, tag = "4")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "5")]
    pub text: ::prost::alloc::string::String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum EventExpiration {
    Unspecified = 0,
    NeverExpire = 1,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Touch {
    #[prost(int32, tag = "1")]
    pub x: i32,
    #[prost(int32, tag = "2")]
    pub y: i32,
    #[prost(int32, tag = "3")]
    pub identifier: i32,
    /// 0 lifts the finger.
    #[prost(int32, tag = "4")]
    pub pressure: i32,
    #[prost(int32, tag = "5")]
    pub touch_major: i32,
    #[prost(int32, tag = "6")]
    pub touch_minor: i32,
    #[prost(enumeration = "EventExpiration", tag = "7")]
    pub expiration: i32,
    #[prost(int32, tag = "8")]
    pub orientation: i32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TouchEvent {
    #[prost(message, repeated, tag = "1")]
    pub touches: ::prost::alloc::vec::Vec<Touch>,
    #[prost(int32, tag = "2")]
    pub display: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum VmHypervisorType {
    Unknown = 0,
    None = 1,
    Kvm = 2,
    Hvf = 3,
    Haxm = 4,
    Whpx = 5,
    Gvm = 6,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct VmConfiguration {
    #[prost(enumeration = "VmHypervisorType", tag = "1")]
    pub hypervisor_type: i32,
    #[prost(int32, tag = "2")]
    pub number_of_cpu_cores: i32,
    #[prost(int64, tag = "3")]
    pub ram_size_bytes: i64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Entry {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EntryList {
    #[prost(message, repeated, tag = "1")]
    pub entry: ::prost::alloc::vec::Vec<Entry>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EmulatorStatus {
    #[prost(string, tag = "1")]
    pub version: ::prost::alloc::string::String,
    /// Milliseconds since the emulator started.
    #[prost(uint64, tag = "2")]
    pub uptime: u64,
    #[prost(bool, tag = "3")]
    pub booted: bool,
    #[prost(message, optional, tag = "4")]
    pub vm_config: ::core::option::Option<VmConfiguration>,
    #[prost(message, optional, tag = "5")]
    pub hardware_config: ::core::option::Option<EntryList>,
}
