//! Event and profile update types.

use crate::properties::Properties;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::net::IpAddr;

/// Origin IP address attached to a call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ip {
    /// Send nothing; the server geolocates from the request origin.
    #[default]
    Detect,
    /// Send this address.
    Addr(IpAddr),
    /// Tell the server not to record an IP at all.
    Omit,
}

impl Ip {
    /// Value to put in the payload, `None` when the field is left out.
    pub(crate) fn wire_value(&self) -> Option<Value> {
        match self {
            Ip::Detect => None,
            Ip::Addr(addr) => Some(Value::String(addr.to_string())),
            Ip::Omit => Some(Value::String("0".into())),
        }
    }
}

impl From<IpAddr> for Ip {
    fn from(addr: IpAddr) -> Self {
        Ip::Addr(addr)
    }
}

/// Timestamp handling for profile updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileTime {
    /// No timestamp; the server uses the time it receives the update.
    #[default]
    Now,
    /// Apply the update as of this instant.
    At(DateTime<Utc>),
    /// Do not touch the profile's "last seen" time.
    Ignore,
}

impl From<DateTime<Utc>> for ProfileTime {
    fn from(ts: DateTime<Utc>) -> Self {
        ProfileTime::At(ts)
    }
}

/// Profile update verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Set,
    SetOnce,
    Add,
    Append,
    Union,
    Remove,
    Unset,
    Delete,
    /// Any verb not listed above, sent verbatim.
    Other(String),
}

impl Operation {
    /// Key used for this verb in the request object.
    pub fn as_str(&self) -> &str {
        match self {
            Operation::Set => "$set",
            Operation::SetOnce => "$set_once",
            Operation::Add => "$add",
            Operation::Append => "$append",
            Operation::Union => "$union",
            Operation::Remove => "$remove",
            Operation::Unset => "$unset",
            Operation::Delete => "$delete",
            Operation::Other(verb) => verb,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Operation {
    fn from(verb: &str) -> Self {
        match verb {
            "$set" => Operation::Set,
            "$set_once" => Operation::SetOnce,
            "$add" => Operation::Add,
            "$append" => Operation::Append,
            "$union" => Operation::Union,
            "$remove" => Operation::Remove,
            "$unset" => Operation::Unset,
            "$delete" => Operation::Delete,
            other => Operation::Other(other.to_string()),
        }
    }
}

impl From<String> for Operation {
    fn from(verb: String) -> Self {
        Operation::from(verb.as_str())
    }
}

/// A tracked event.
///
/// At least one property should be set; the server ignores empty events.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub ip: Ip,
    /// `None` lets the server assign the receive time.
    pub timestamp: Option<DateTime<Utc>>,
    pub properties: Properties,
}

impl Event {
    /// Create an event with no properties, autodetected IP and server time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.set(key, value);
        self
    }

    /// Replace all properties.
    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Set the origin IP handling.
    pub fn ip(mut self, ip: impl Into<Ip>) -> Self {
        self.ip = ip.into();
        self
    }

    /// Record the event as of `ts` instead of the receive time.
    pub fn timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }
}

/// An update to a user or group profile.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub ip: Ip,
    pub time: ProfileTime,
    pub operation: Operation,
    pub properties: Properties,
}

impl ProfileUpdate {
    /// Create an update applying `operation` to the given properties.
    pub fn new(operation: impl Into<Operation>) -> Self {
        Self {
            ip: Ip::default(),
            time: ProfileTime::default(),
            operation: operation.into(),
            properties: Properties::new(),
        }
    }

    /// Shorthand for a `$set` update.
    pub fn set() -> Self {
        Self::new(Operation::Set)
    }

    /// Shorthand for a `$union` update.
    pub fn union() -> Self {
        Self::new(Operation::Union)
    }

    /// Add a property.
    pub fn property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.set(key, value);
        self
    }

    /// Replace all properties.
    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Set the origin IP handling.
    pub fn ip(mut self, ip: impl Into<Ip>) -> Self {
        self.ip = ip.into();
        self
    }

    /// Set the timestamp handling.
    pub fn time(mut self, time: impl Into<ProfileTime>) -> Self {
        self.time = time.into();
        self
    }

    /// Leave the profile's last-seen time untouched.
    pub fn ignore_time(mut self) -> Self {
        self.time = ProfileTime::Ignore;
        self
    }
}
