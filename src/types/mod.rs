//! Wire types exposed by the `corpus-datasource` crate.

pub mod discriminator;
pub mod envelope;
pub mod metadata;
pub mod request;

pub use discriminator::Discriminator;
pub use envelope::Envelope;
pub use metadata::{DataSourceMetadata, DataSourceMetadataBuilder};
pub use request::{Inbound, ListRange, Request, RequestKind};
