#![deny(clippy::all, clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![cfg_attr(test, allow(clippy::uninlined_format_args))]
#![allow(clippy::module_name_repetitions)]
//
// Documentation lints: internal helpers are self-describing; public APIs carry docs.
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
//
// Builders take owned values.
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

//! Directory-backed corpus datasource.
//!
//! A [`Datasource`] answers discriminator-tagged JSON envelopes: corpus size,
//! (paginated) entry listing, single-document fetch, and substring search over
//! entry names. All failures come back as error envelopes.

/// The corpus-datasource crate version (matches `Cargo.toml`).
pub const DATASOURCE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod constants;
pub mod datasource;
pub mod error;
pub mod index;
pub mod operations;
pub mod types;

#[cfg(test)]
use std::sync::Mutex;

pub use config::{ConfigSource, DatasourceConfig, clear_path_override, set_path_override};
pub use constants::{DATASOURCE_PATH_KEY, DEFAULT_DATASOURCE_PATH};
pub use datasource::{DataSource, Datasource};
pub use error::{DatasourceError, Result};
pub use index::{DirectoryIndex, IndexState};
pub use types::{
    DataSourceMetadata, DataSourceMetadataBuilder, Discriminator, Envelope, Inbound, ListRange,
    Request, RequestKind,
};

#[cfg(test)]
static SERIAL_TEST_MUTEX: Mutex<()> = Mutex::new(());

/// Serialises tests that touch process-global configuration.
#[cfg(test)]
pub(crate) fn run_serial_test<T>(f: impl FnOnce() -> T) -> T {
    let _guard = SERIAL_TEST_MUTEX
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    f()
}
