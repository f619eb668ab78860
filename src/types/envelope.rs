//! The tagged message wrapper used for every request and response.

use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::discriminator::Discriminator;
use super::metadata::DataSourceMetadata;
use crate::error::Result;

/// A discriminator plus a payload whose shape depends on the discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub discriminator: Discriminator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    /// Free-form string options; never consulted by dispatch.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub parameters: BTreeMap<String, String>,
}

impl Envelope {
    #[must_use]
    pub fn new(discriminator: Discriminator, payload: Option<Value>) -> Self {
        Self {
            discriminator,
            payload,
            parameters: BTreeMap::new(),
        }
    }

    /// Envelope with no payload, e.g. a size or metadata request.
    #[must_use]
    pub fn request(discriminator: Discriminator) -> Self {
        Self::new(discriminator, None)
    }

    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn ok(count: usize) -> Self {
        Self::new(Discriminator::Ok, Some(Value::from(count)))
    }

    #[must_use]
    pub fn string_list(entries: Vec<String>) -> Self {
        Self::new(Discriminator::StringList, Some(Value::from(entries)))
    }

    #[must_use]
    pub fn raw_string(text: String) -> Self {
        Self::new(Discriminator::RawString, Some(Value::String(text)))
    }

    #[must_use]
    pub fn error(message: impl Display) -> Self {
        Self::new(Discriminator::Error, Some(Value::String(message.to_string())))
    }

    pub fn metadata(document: &DataSourceMetadata) -> Result<Self> {
        Ok(Self::new(
            Discriminator::Metadata,
            Some(serde_json::to_value(document)?),
        ))
    }

    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.discriminator.is_error()
    }

    /// The payload as a string slice, when it is one.
    #[must_use]
    pub fn payload_str(&self) -> Option<&str> {
        self.payload.as_ref().and_then(Value::as_str)
    }

    /// Compact JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON rendering.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn null_as_empty<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}
