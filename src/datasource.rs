//! The datasource service: envelope dispatch over a directory-backed corpus.
//!
//! Responsibilities:
//! - Resolve the corpus root once, caching any configuration fault.
//! - Route each inbound envelope by discriminator to the matching operation.
//! - Translate every fault into an error envelope; nothing escapes `execute`.

use std::io::Write;

use once_cell::sync::OnceCell;
use serde_json::json;

use crate::config::DatasourceConfig;
use crate::constants::vocab;
use crate::error::{DatasourceError, Result};
use crate::index::DirectoryIndex;
use crate::operations;
use crate::types::{DataSourceMetadata, Envelope, Inbound, ListRange, Request, RequestKind};

/// Synchronous JSON-in, JSON-out service contract.
pub trait DataSource: Send + Sync {
    /// Handle one serialized envelope and return the serialized response envelope.
    fn execute(&self, input: &str) -> String;

    /// Serialized metadata envelope describing the service.
    fn metadata(&self) -> String;
}

/// A datasource over the files directly beneath one directory.
///
/// The directory listing and the metadata document are each built at most
/// once per instance.
#[derive(Debug)]
pub struct Datasource {
    index: std::result::Result<DirectoryIndex, DatasourceError>,
    metadata: OnceCell<String>,
}

impl Datasource {
    /// Create a datasource whose root comes from the override, the environment, or the default.
    #[must_use]
    pub fn new() -> Self {
        match DatasourceConfig::resolve() {
            Ok(config) => Self::with_config(config),
            Err(err) => {
                tracing::error!(error = %err, "datasource misconfigured");
                Self {
                    index: Err(err),
                    metadata: OnceCell::new(),
                }
            }
        }
    }

    #[must_use]
    pub fn with_config(config: DatasourceConfig) -> Self {
        tracing::info!(
            datasource.root = %config.root().display(),
            datasource.source = %config.source(),
            "using corpus directory"
        );
        Self {
            index: Ok(DirectoryIndex::new(config.root())),
            metadata: OnceCell::new(),
        }
    }

    /// Visible entry names, scanning on first use, or the cached fault.
    pub fn entries(&self) -> std::result::Result<&[String], &DatasourceError> {
        self.index.as_ref()?.entries()
    }

    /// Write every entry name on its own line.
    pub fn dump<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let entries = self
            .entries()
            .map_err(|err| std::io::Error::other(err.to_string()))?;
        for name in entries {
            writeln!(out, "{name}")?;
        }
        Ok(())
    }
}

impl Default for Datasource {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSource for Datasource {
    fn execute(&self, input: &str) -> String {
        let index = match &self.index {
            Ok(index) => index,
            Err(err) => return render_error(err),
        };
        let envelope = match Envelope::parse(input) {
            Ok(envelope) => envelope,
            Err(err) => return render_error(&err),
        };
        match Inbound::classify(&envelope.discriminator) {
            Inbound::Passthrough => input.to_string(),
            Inbound::Metadata => {
                tracing::debug!(request.kind = "metadata", "serving cached metadata");
                self.metadata()
            }
            Inbound::Request(kind) => dispatch(index, kind, &envelope),
            Inbound::Unsupported(value) => {
                tracing::warn!(discriminator = %value, "unsupported discriminator");
                render_error(&DatasourceError::InvalidDiscriminator { value })
            }
        }
    }

    fn metadata(&self) -> String {
        self.metadata
            .get_or_try_init(|| Envelope::metadata(&describe())?.to_pretty_json())
            .cloned()
            .unwrap_or_else(|err| render_error(&err))
    }
}

fn dispatch(index: &DirectoryIndex, kind: RequestKind, envelope: &Envelope) -> String {
    tracing::debug!(request.kind = kind.label(), "dispatching request");
    let entries = match index.entries() {
        Ok(entries) => entries,
        Err(err) => return render_error(err),
    };
    Request::decode(kind, envelope)
        .and_then(|request| serve(index, entries, request))
        .unwrap_or_else(|err| render_error(&err))
}

fn serve(index: &DirectoryIndex, entries: &[String], request: Request) -> Result<String> {
    match request {
        Request::Size => operations::size(entries).to_json(),
        Request::List(range) => operations::list(entries, range).to_json(),
        Request::Get(key) => operations::get(index.root(), &key)?.to_json(),
        Request::Query(None) => operations::list(entries, ListRange::default()).to_json(),
        Request::Query(Some(pattern)) => operations::query(entries, &pattern).to_pretty_json(),
    }
}

fn describe() -> DataSourceMetadata {
    DataSourceMetadata::builder()
        .name(std::any::type_name::<Datasource>())
        .version(crate::DATASOURCE_VERSION)
        .vendor("http://www.anc.org")
        .allow(vocab::ANY)
        .encoding("UTF-8")
        .format(vocab::LIF)
        .description("Generic DataSource")
        .license(vocab::APACHE2)
        .build()
}

fn render_error(err: &DatasourceError) -> String {
    Envelope::error(err).to_pretty_json().unwrap_or_else(|render| {
        tracing::error!(error = %render, "failed to render error envelope");
        format!("{:#}", json!({ "discriminator": vocab::ERROR, "payload": err.to_string() }))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DATASOURCE_PATH_KEY;
    use crate::types::Discriminator;
    use crate::{config, run_serial_test};
    use tempfile::tempdir;

    fn call(source: &Datasource, request: &Envelope) -> Envelope {
        let response = source.execute(&request.to_json().expect("json"));
        Envelope::parse(&response).expect("response envelope")
    }

    #[test]
    fn datasource_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Datasource>();
    }

    #[test]
    fn metadata_is_built_once_and_served_by_execute() {
        let dir = tempdir().expect("tmp");
        let source = Datasource::with_config(DatasourceConfig::new(dir.path()));

        let direct = source.metadata();
        let request = Envelope::request(Discriminator::GetMetadata);
        let via_execute = source.execute(&request.to_json().expect("json"));
        assert_eq!(direct, via_execute);

        let envelope = Envelope::parse(&direct).expect("metadata envelope");
        assert_eq!(envelope.discriminator, Discriminator::Metadata);
        let payload = envelope.payload.expect("payload");
        assert_eq!(payload["version"], json!(crate::DATASOURCE_VERSION));
        assert_eq!(payload["description"], json!("Generic DataSource"));
    }

    #[test]
    fn metadata_does_not_touch_the_index() {
        let dir = tempdir().expect("tmp");
        let source = Datasource::with_config(DatasourceConfig::new(dir.path().join("absent")));

        let response = call(&source, &Envelope::request(Discriminator::GetMetadata));
        assert_eq!(response.discriminator, Discriminator::Metadata);
        let index = source.index.as_ref().expect("configured");
        assert!(index.state().is_none());
    }

    #[test]
    fn configuration_fault_short_circuits_everything() {
        run_serial_test(|| {
            config::set_path_override("");
            let source = Datasource::new();
            config::clear_path_override();

            let garbage = source.execute("not json at all");
            let request = Envelope::request(Discriminator::GetMetadata);
            let metadata = source.execute(&request.to_json().expect("json"));
            assert_eq!(garbage, metadata);

            let envelope = Envelope::parse(&garbage).expect("error envelope");
            assert!(envelope.is_error());
            assert!(
                envelope
                    .payload_str()
                    .expect("message")
                    .contains(DATASOURCE_PATH_KEY)
            );
        });
    }

    #[test]
    fn dump_writes_one_name_per_line() {
        let dir = tempdir().expect("tmp");
        std::fs::write(dir.path().join("only.txt"), "x").expect("write");
        std::fs::write(dir.path().join(".skip"), "x").expect("write");
        let source = Datasource::with_config(DatasourceConfig::new(dir.path()));

        let mut out = Vec::new();
        source.dump(&mut out).expect("dump");
        assert_eq!(String::from_utf8(out).expect("utf8"), "only.txt\n");
    }

    #[test]
    fn dump_surfaces_index_fault() {
        let dir = tempdir().expect("tmp");
        let source = Datasource::with_config(DatasourceConfig::new(dir.path().join("gone")));
        let err = source.dump(&mut Vec::new()).expect_err("missing root");
        assert_eq!(err.to_string(), "Datasource directory not found.");
    }
}
