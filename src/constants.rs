//! Fixed keys, defaults, messages and vocabulary URIs shared across the crate.

/// Name of both the process override and the environment variable that select the corpus root.
pub const DATASOURCE_PATH_KEY: &str = "DATASOURCE_PATH";

/// Corpus root used when neither the override nor the environment variable is set.
pub const DEFAULT_DATASOURCE_PATH: &str = "/var/lib/datasource";

/// Entries whose name starts with this prefix are hidden from the index.
pub const HIDDEN_ENTRY_PREFIX: char = '.';

/// Separator used when joining the lines of a fetched document.
pub const LINE_SEPARATOR: &str = "\n";

pub mod vocab {
    //! URIs from the shared discriminator vocabulary.

    pub const SIZE: &str = "http://vocab.lappsgrid.org/ns/action/size";
    pub const LIST: &str = "http://vocab.lappsgrid.org/ns/action/list";
    pub const GET: &str = "http://vocab.lappsgrid.org/ns/action/get";
    pub const QUERY: &str = "http://vocab.lappsgrid.org/ns/action/query";
    pub const GET_METADATA: &str = "http://vocab.lappsgrid.org/ns/action/metadata";

    pub const ERROR: &str = "http://vocab.lappsgrid.org/ns/error";
    pub const OK: &str = "http://vocab.lappsgrid.org/ns/ok";
    pub const STRING_LIST: &str = "http://vocab.lappsgrid.org/ns/string-list";
    pub const TEXT: &str = "http://vocab.lappsgrid.org/ns/media/text";
    pub const META: &str = "http://vocab.lappsgrid.org/ns/meta";

    pub const ANY: &str = "http://vocab.lappsgrid.org/ns/any";
    pub const LIF: &str = "http://vocab.lappsgrid.org/ns/media/jsonld#lif";
    pub const APACHE2: &str = "http://vocab.lappsgrid.org/ns/license#apache-2.0";
    pub const DATASOURCE_SCHEMA: &str =
        "https://vocab.lappsgrid.org/schema/datasource-schema-1.0.0.json";
}
