//! Typed requests decoded from inbound envelopes.
//!
//! Decoding happens in two steps: the discriminator is classified first (so
//! the dispatcher can short-circuit errors and unknown tags before touching
//! the corpus), then the payload is coerced into the operation's own shape.

use std::ops::Range;
use std::path::{Component, Path};

use serde_json::Value;

use super::discriminator::Discriminator;
use super::envelope::Envelope;
use crate::error::{DatasourceError, Result};

/// An index-backed operation an inbound envelope asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Size,
    List,
    Get,
    Query,
}

impl RequestKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Size => "size",
            Self::List => "list",
            Self::Get => "get",
            Self::Query => "query",
        }
    }
}

/// Result of classifying an inbound envelope by its discriminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// An error envelope; returned to the caller untouched.
    Passthrough,
    /// Served from the cached metadata document, never from the index.
    Metadata,
    Request(RequestKind),
    Unsupported(String),
}

impl Inbound {
    #[must_use]
    pub fn classify(discriminator: &Discriminator) -> Self {
        match discriminator {
            Discriminator::Error => Self::Passthrough,
            Discriminator::GetMetadata => Self::Metadata,
            Discriminator::Size => Self::Request(RequestKind::Size),
            Discriminator::List => Self::Request(RequestKind::List),
            Discriminator::Get => Self::Request(RequestKind::Get),
            Discriminator::Query => Self::Request(RequestKind::Query),
            Discriminator::Ok
            | Discriminator::StringList
            | Discriminator::RawString
            | Discriminator::Metadata
            | Discriminator::Other(_) => Self::Unsupported(discriminator.uri().to_string()),
        }
    }
}

/// A fully decoded request with its payload validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Size,
    List(ListRange),
    Get(String),
    /// `None` lists the whole corpus.
    Query(Option<String>),
}

impl Request {
    pub fn decode(kind: RequestKind, envelope: &Envelope) -> Result<Self> {
        let payload = envelope.payload.as_ref().filter(|value| !value.is_null());
        Ok(match kind {
            RequestKind::Size => Self::Size,
            RequestKind::List => Self::List(ListRange::from_payload(payload)?),
            RequestKind::Get => {
                let key = payload
                    .map(scalar_to_string)
                    .transpose()?
                    .ok_or(DatasourceError::MissingKey)?;
                validate_key(&key)?;
                Self::Get(key)
            }
            RequestKind::Query => Self::Query(payload.map(scalar_to_string).transpose()?),
        })
    }
}

/// Optional `start`/`end` bounds of a list request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListRange {
    pub start: Option<i64>,
    pub end: Option<i64>,
}

impl ListRange {
    #[must_use]
    pub fn new(start: Option<i64>, end: Option<i64>) -> Self {
        Self { start, end }
    }

    pub fn from_payload(payload: Option<&Value>) -> Result<Self> {
        let Some(payload) = payload else {
            return Ok(Self::default());
        };
        let Value::Object(fields) = payload else {
            return Err(DatasourceError::InvalidPayload {
                reason: "list range must be an object".into(),
            });
        };
        let field = |name: &'static str| match fields.get(name) {
            Some(value) => coerce_int(name, value),
            None => Ok(None),
        };
        Ok(Self {
            start: field("start")?,
            end: field("end")?,
        })
    }

    /// Half-open slice bounds for an index of `len` entries.
    ///
    /// Without `start` the whole index is selected. A negative `start` counts
    /// as zero, an `end` below `start` is ignored, and both bounds are clamped
    /// to `len` so the slice is always in range.
    #[must_use]
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let Some(start) = self.start else {
            return 0..len;
        };
        let start = start.max(0);
        let end = self.end.filter(|&end| end >= start);
        let start = clamp_to_len(start, len);
        let end = end.map_or(len, |end| clamp_to_len(end, len));
        start..end
    }
}

fn clamp_to_len(value: i64, len: usize) -> usize {
    usize::try_from(value).map_or(len, |v| v.min(len))
}

fn coerce_int(field: &'static str, value: &Value) -> Result<Option<i64>> {
    let invalid = || DatasourceError::InvalidRange {
        field,
        value: value.to_string(),
    };
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => number.as_i64().map(Some).ok_or_else(invalid),
        Value::String(text) => text
            .parse::<i64>()
            .map(Some)
            .map_err(|_| DatasourceError::InvalidRange {
                field,
                value: text.clone(),
            }),
        _ => Err(invalid()),
    }
}

fn scalar_to_string(value: &Value) -> Result<String> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(DatasourceError::InvalidPayload {
            reason: "expected a string value".into(),
        }),
    }
}

/// Keys must be a relative path of plain names so lookups stay beneath the corpus root.
fn validate_key(key: &str) -> Result<()> {
    let mut components = Path::new(key).components().peekable();
    let contained = components.peek().is_some()
        && components.all(|component| matches!(component, Component::Normal(_)));
    if contained {
        Ok(())
    } else {
        Err(DatasourceError::InvalidKey {
            key: key.to_string(),
        })
    }
}
