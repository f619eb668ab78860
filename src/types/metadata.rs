//! Descriptive document returned for metadata requests.

use serde::{Deserialize, Serialize};

use crate::constants::vocab;

/// Self-description of a datasource service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceMetadata {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub version: String,
    pub vendor: String,
    pub allow: String,
    pub encoding: String,
    pub format: Vec<String>,
    pub description: String,
    pub license: String,
}

impl Default for DataSourceMetadata {
    fn default() -> Self {
        Self {
            schema: vocab::DATASOURCE_SCHEMA.to_string(),
            name: String::new(),
            version: String::new(),
            vendor: String::new(),
            allow: vocab::ANY.to_string(),
            encoding: "UTF-8".to_string(),
            format: Vec::new(),
            description: String::new(),
            license: vocab::APACHE2.to_string(),
        }
    }
}

impl DataSourceMetadata {
    #[must_use]
    pub fn builder() -> DataSourceMetadataBuilder {
        DataSourceMetadataBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DataSourceMetadataBuilder {
    inner: DataSourceMetadata,
}

impl DataSourceMetadataBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.inner.name = name.into();
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.inner.version = version.into();
        self
    }

    #[must_use]
    pub fn vendor(mut self, vendor: impl Into<String>) -> Self {
        self.inner.vendor = vendor.into();
        self
    }

    #[must_use]
    pub fn allow(mut self, allow: impl Into<String>) -> Self {
        self.inner.allow = allow.into();
        self
    }

    #[must_use]
    pub fn encoding(mut self, encoding: impl Into<String>) -> Self {
        self.inner.encoding = encoding.into();
        self
    }

    /// Adds an output format; may be called repeatedly.
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.inner.format.push(format.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.inner.description = description.into();
        self
    }

    #[must_use]
    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.inner.license = license.into();
        self
    }

    #[must_use]
    pub fn build(self) -> DataSourceMetadata {
        self.inner
    }
}
