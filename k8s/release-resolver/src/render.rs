use crate::{
    common::error::{Result, SerializeJson, SerializeYaml},
    datastore::{
        elasticsearch_url, postgresql_address, resolve_datastore, validate_datastore, Datastore,
        HostSource,
    },
    metadata::validate_dns_label,
    naming::{
        common_labels, resolve_chart_label, resolve_fullname, resolve_name,
        resolve_service_account_name, selector_labels, Labels,
    },
    release::ReleaseConfig,
};
use serde::Serialize;
use snafu::ResultExt;
use tracing::{debug, warn};

/// Resolved connection details of a backing datastore.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedDatastore {
    #[serde(flatten)]
    host: HostSource,
    /// `host:port` for PostgreSQL, the API URL for Elasticsearch.
    endpoint: String,
}

impl ResolvedDatastore {
    pub fn host(&self) -> &HostSource {
        &self.host
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

/// Everything the resource templates of a release read from the naming helpers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedRelease {
    name: String,
    fullname: String,
    chart: String,
    labels: Labels,
    selector_labels: Labels,
    service_account_name: String,
    postgresql: ResolvedDatastore,
    elasticsearch: ResolvedDatastore,
}

impl ResolvedRelease {
    /// Resolve every name, label and host of the release. This never fails, misconfigured
    /// datastores are passed through and only logged.
    pub fn resolve(cfg: &ReleaseConfig) -> Self {
        for datastore in [Datastore::Postgresql, Datastore::Elasticsearch] {
            if let Err(error) = validate_datastore(datastore, cfg) {
                warn!(%error, "Passing datastore host through unvalidated");
            }
        }

        let resolved = Self {
            name: resolve_name(cfg),
            fullname: resolve_fullname(cfg),
            chart: resolve_chart_label(cfg),
            labels: common_labels(cfg),
            selector_labels: selector_labels(cfg),
            service_account_name: resolve_service_account_name(cfg),
            postgresql: ResolvedDatastore {
                host: resolve_datastore(Datastore::Postgresql, cfg),
                endpoint: postgresql_address(cfg),
            },
            elasticsearch: ResolvedDatastore {
                host: resolve_datastore(Datastore::Elasticsearch, cfg),
                endpoint: elasticsearch_url(cfg),
            },
        };
        debug!(release = cfg.release_name(), fullname = %resolved.fullname, "Resolved release");

        resolved
    }

    /// Like [`ResolvedRelease::resolve`], but fails if a datastore has no usable host or if the
    /// fully qualified name is not a valid DNS label.
    pub fn resolve_strict(cfg: &ReleaseConfig) -> Result<Self> {
        validate_datastore(Datastore::Postgresql, cfg)?;
        validate_datastore(Datastore::Elasticsearch, cfg)?;
        validate_dns_label(resolve_fullname(cfg).as_str())?;

        Ok(Self::resolve(cfg))
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn fullname(&self) -> &str {
        self.fullname.as_str()
    }

    pub fn chart(&self) -> &str {
        self.chart.as_str()
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn selector_labels(&self) -> &Labels {
        &self.selector_labels
    }

    pub fn service_account_name(&self) -> &str {
        self.service_account_name.as_str()
    }

    pub fn postgresql(&self) -> &ResolvedDatastore {
        &self.postgresql
    }

    pub fn elasticsearch(&self) -> &ResolvedDatastore {
        &self.elasticsearch
    }

    /// YAML document of the resolved release.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context(SerializeYaml)
    }

    /// Pretty-printed JSON of the resolved release.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context(SerializeJson)
    }

    /// The resolved values as (key, value) rows, in display order.
    pub fn rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            ("name".to_string(), self.name.clone()),
            ("fullname".to_string(), self.fullname.clone()),
            ("chart".to_string(), self.chart.clone()),
            (
                "serviceAccountName".to_string(),
                self.service_account_name.clone(),
            ),
        ];
        for (key, datastore) in [
            ("postgresql", &self.postgresql),
            ("elasticsearch", &self.elasticsearch),
        ] {
            let source = if datastore.host.is_in_cluster() {
                "in-cluster"
            } else {
                "external"
            };
            rows.push((
                format!("{key}.host"),
                format!("{} ({source})", datastore.host.host()),
            ));
            rows.push((format!("{key}.endpoint"), datastore.endpoint.clone()));
        }
        rows.extend(
            self.labels
                .iter()
                .map(|(key, value)| (format!("labels.{key}"), value.clone())),
        );
        rows
    }
}
