//! Discriminator tags identifying the semantic kind of an envelope.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::vocab;

/// Classification tag carried by every envelope.
///
/// Known vocabulary URIs map to dedicated variants; anything else is kept
/// verbatim in [`Discriminator::Other`] so it can be echoed back in errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Discriminator {
    Size,
    List,
    Get,
    Query,
    GetMetadata,
    Error,
    Ok,
    StringList,
    RawString,
    Metadata,
    Other(String),
}

impl Discriminator {
    #[must_use]
    pub fn uri(&self) -> &str {
        match self {
            Self::Size => vocab::SIZE,
            Self::List => vocab::LIST,
            Self::Get => vocab::GET,
            Self::Query => vocab::QUERY,
            Self::GetMetadata => vocab::GET_METADATA,
            Self::Error => vocab::ERROR,
            Self::Ok => vocab::OK,
            Self::StringList => vocab::STRING_LIST,
            Self::RawString => vocab::TEXT,
            Self::Metadata => vocab::META,
            Self::Other(value) => value,
        }
    }

    #[must_use]
    pub fn from_uri(uri: &str) -> Self {
        match uri {
            vocab::SIZE => Self::Size,
            vocab::LIST => Self::List,
            vocab::GET => Self::Get,
            vocab::QUERY => Self::Query,
            vocab::GET_METADATA => Self::GetMetadata,
            vocab::ERROR => Self::Error,
            vocab::OK => Self::Ok,
            vocab::STRING_LIST => Self::StringList,
            vocab::TEXT => Self::RawString,
            vocab::META => Self::Metadata,
            other => Self::Other(other.to_string()),
        }
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }
}

impl From<String> for Discriminator {
    fn from(value: String) -> Self {
        match Self::from_uri(&value) {
            Self::Other(_) => Self::Other(value),
            known => known,
        }
    }
}

impl From<Discriminator> for String {
    fn from(value: Discriminator) -> Self {
        match value {
            Discriminator::Other(raw) => raw,
            known => known.uri().to_string(),
        }
    }
}

impl fmt::Display for Discriminator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.uri())
    }
}
