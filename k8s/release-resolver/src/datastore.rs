use crate::{
    common::error::{InvalidConfiguration, Result},
    naming::resolve_datastore_host,
    release::{DatastoreConfig, ReleaseConfig},
};
use constants::{
    ELASTICSEARCH_DEFAULT_PORT, ELASTICSEARCH_DEFAULT_SCHEME, ELASTICSEARCH_HOST_SUFFIX,
    POSTGRESQL_DEFAULT_PORT, POSTGRESQL_HOST_SUFFIX,
};
use serde::Serialize;
use snafu::ensure;
use std::fmt;

/// The backing datastores a release connects to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Datastore {
    /// The relational datastore.
    Postgresql,
    /// The search-index (visibility) datastore.
    Elasticsearch,
}

impl Datastore {
    /// Name suffix of the Service of an in-cluster instance.
    pub fn generated_suffix(&self) -> &'static str {
        match self {
            Self::Postgresql => POSTGRESQL_HOST_SUFFIX,
            Self::Elasticsearch => ELASTICSEARCH_HOST_SUFFIX,
        }
    }

    /// The values.yaml key which toggles the in-cluster instance.
    pub fn values_key(&self) -> &'static str {
        match self {
            Self::Postgresql => "postgresql",
            Self::Elasticsearch => "elasticsearch",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::Postgresql => POSTGRESQL_DEFAULT_PORT,
            Self::Elasticsearch => ELASTICSEARCH_DEFAULT_PORT,
        }
    }

    /// The settings of this datastore in the release.
    pub fn config<'a>(&self, cfg: &'a ReleaseConfig) -> &'a DatastoreConfig {
        match self {
            Self::Postgresql => cfg.postgresql(),
            Self::Elasticsearch => cfg.elasticsearch(),
        }
    }
}

impl fmt::Display for Datastore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.values_key())
    }
}

/// Where a datastore host came from. A host is always exactly one of these.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "host", rename_all = "camelCase")]
pub enum HostSource {
    /// The Service of an instance deployed by this release.
    InCluster(String),
    /// A pre-existing instance, as configured by the user.
    External(String),
}

impl HostSource {
    pub fn host(&self) -> &str {
        match self {
            Self::InCluster(host) | Self::External(host) => host.as_str(),
        }
    }

    pub fn is_in_cluster(&self) -> bool {
        matches!(self, Self::InCluster(_))
    }
}

/// Resolve the host of `datastore` for the release.
pub fn resolve_datastore(datastore: Datastore, cfg: &ReleaseConfig) -> HostSource {
    let store = datastore.config(cfg);
    let host = resolve_datastore_host(
        store.enabled(),
        datastore.generated_suffix(),
        store.external_host(),
        cfg,
    );

    if store.enabled() {
        HostSource::InCluster(host)
    } else {
        HostSource::External(host)
    }
}

/// Validate that `datastore` resolves to a usable host: it is either deployed in-cluster, or an
/// external host is given.
pub fn validate_datastore(datastore: Datastore, cfg: &ReleaseConfig) -> Result<()> {
    let store = datastore.config(cfg);

    ensure!(
        store.enabled() || !store.external_host().trim().is_empty(),
        InvalidConfiguration {
            datastore: datastore.to_string(),
            reason: format!(
                "{} is not enabled and no external host is set",
                datastore.values_key()
            ),
        }
    );

    Ok(())
}

/// Port of the datastore. An in-cluster instance always listens on the default port.
fn port(datastore: Datastore, cfg: &ReleaseConfig) -> u16 {
    let store = datastore.config(cfg);
    match store.external_port() {
        Some(port) if !store.enabled() => port,
        _ => datastore.default_port(),
    }
}

/// The `host:port` address of the PostgreSQL datastore.
pub fn postgresql_address(cfg: &ReleaseConfig) -> String {
    let source = resolve_datastore(Datastore::Postgresql, cfg);
    format!("{}:{}", source.host(), port(Datastore::Postgresql, cfg))
}

/// The URL of the Elasticsearch HTTP API.
pub fn elasticsearch_url(cfg: &ReleaseConfig) -> String {
    let store = cfg.elasticsearch();
    let scheme = match store.external_scheme() {
        Some(scheme) if !store.enabled() => scheme,
        _ => ELASTICSEARCH_DEFAULT_SCHEME,
    };
    let source = resolve_datastore(Datastore::Elasticsearch, cfg);

    format!(
        "{scheme}://{}:{}",
        source.host(),
        port(Datastore::Elasticsearch, cfg)
    )
}
