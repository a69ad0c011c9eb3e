//! Request arguments and the reply envelope
//!
//! The wire format is the embedding server's business; by the time a
//! command handler runs, a request is a key/value map of already-parsed
//! strings, and the handler's answer is a tagged message.

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Reply tag
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MsgType {
    /// Successful completion
    Normal,
    /// Completed with a caveat
    Warning,
    /// Failed; the message is the error text
    Error,
}

/// Response envelope for one command
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    /// Outcome tag
    pub msg_type: MsgType,
    /// Human-readable payload
    pub msg: String,
}

impl Reply {
    /// Successful reply
    pub fn normal(msg: impl Into<String>) -> Self {
        Self {
            msg_type: MsgType::Normal,
            msg: msg.into(),
        }
    }

    /// Warning reply
    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            msg_type: MsgType::Warning,
            msg: msg.into(),
        }
    }

    /// Error reply
    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            msg_type: MsgType::Error,
            msg: msg.into(),
        }
    }
}

impl From<Error> for Reply {
    fn from(e: Error) -> Self {
        Self::error(e.to_string())
    }
}

/// Parsed argument map of one request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MsgArgs {
    args: BTreeMap<String, String>,
}

impl MsgArgs {
    /// Empty argument map
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from key/value pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            args: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set one argument (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }

    /// Required argument lookup
    pub fn get(&self, key: &'static str) -> Result<&str> {
        self.args
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| Error::BadArgument {
                arg: key,
                reason: "missing".to_string(),
            })
    }

    /// Optional argument lookup
    pub fn get_opt(&self, key: &str) -> Option<&str> {
        self.args.get(key).map(String::as_str)
    }
}
