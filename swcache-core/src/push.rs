//! Raw push message data.

use bytes::Bytes;
use serde::de::DeserializeOwned;

/// The payload of one push message, as delivered by the push transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushData {
    bytes: Bytes,
}

impl PushData {
    /// Wraps raw payload bytes.
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// Raw payload bytes.
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// The payload decoded as UTF-8, replacing invalid sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// The payload decoded as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.bytes)
    }
}

impl From<&'static str> for PushData {
    fn from(text: &'static str) -> Self {
        Self::new(Bytes::from_static(text.as_bytes()))
    }
}

impl From<String> for PushData {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
