use crate::{
    common::error::{ReleaseOptionsAbsent, Result},
    helm::{
        chart::Chart,
        values::{ExternalDatastoreValues, ServiceAccountValues, Values},
    },
};
use constants::DEFAULT_MANAGED_BY;

/// Helm treats an empty string the same as an absent value.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// The `serviceAccount` values block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceAccountConfig {
    create: bool,
    name: Option<String>,
}

impl Default for ServiceAccountConfig {
    fn default() -> Self {
        Self {
            create: true,
            name: None,
        }
    }
}

impl ServiceAccountConfig {
    /// Create a new ServiceAccountConfig.
    pub fn new(create: bool, name: Option<String>) -> Self {
        Self { create, name }
    }

    /// Whether the chart creates its own ServiceAccount.
    pub fn create(&self) -> bool {
        self.create
    }

    /// The user supplied ServiceAccount name, if it is non-empty.
    pub fn name(&self) -> Option<&str> {
        non_empty(&self.name)
    }
}

impl From<ServiceAccountValues> for ServiceAccountConfig {
    fn from(values: ServiceAccountValues) -> Self {
        Self::new(values.create, values.name)
    }
}

/// Toggle and external connection details of one backing datastore.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatastoreConfig {
    /// Deploy the datastore as a sub-chart of this release.
    enabled: bool,
    /// Host of the pre-existing instance, used when not enabled.
    external_host: String,
    external_port: Option<u16>,
    external_scheme: Option<String>,
}

impl DatastoreConfig {
    /// A datastore deployed in-cluster with this release.
    pub fn in_cluster() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    /// A datastore which lives outside this release, at `host`.
    pub fn external<H>(host: H) -> Self
    where
        H: ToString,
    {
        Self {
            enabled: false,
            external_host: host.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn from_values(enabled: bool, external: ExternalDatastoreValues) -> Self {
        Self {
            enabled,
            external_host: external.host,
            external_port: external.port,
            external_scheme: external.scheme,
        }
    }

    /// This is a builder option to set the port of the external instance.
    #[must_use]
    pub fn with_port(mut self, port: Option<u16>) -> Self {
        self.external_port = port;
        self
    }

    /// This is a builder option to set the URL scheme of the external instance.
    #[must_use]
    pub fn with_scheme(mut self, scheme: Option<String>) -> Self {
        self.external_scheme = scheme;
        self
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn external_host(&self) -> &str {
        self.external_host.as_str()
    }

    pub fn external_port(&self) -> Option<u16> {
        self.external_port
    }

    pub fn external_scheme(&self) -> Option<&str> {
        non_empty(&self.external_scheme)
    }
}

/// The inputs of a single render pass: chart identity, release name and the user values the
/// naming helpers read. It is immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseConfig {
    chart_name: String,
    chart_version: String,
    app_version: Option<String>,
    release_name: String,
    name_override: Option<String>,
    fullname_override: Option<String>,
    service_account: ServiceAccountConfig,
    postgresql: DatastoreConfig,
    elasticsearch: DatastoreConfig,
    managed_by: String,
}

impl ReleaseConfig {
    /// Returns an empty ReleaseConfigBuilder.
    pub fn builder() -> ReleaseConfigBuilder {
        ReleaseConfigBuilder::default()
    }

    /// Build a ReleaseConfig from a chart's metadata and its (merged) values.
    pub fn from_chart<R, M>(chart: &Chart, values: Values, release_name: R, managed_by: M) -> Self
    where
        R: ToString,
        M: ToString,
    {
        Self {
            chart_name: chart.name().to_string(),
            chart_version: chart.version().to_string(),
            app_version: chart.app_version().map(ToString::to_string),
            release_name: release_name.to_string(),
            name_override: values.name_override,
            fullname_override: values.fullname_override,
            service_account: values.service_account.into(),
            postgresql: DatastoreConfig::from_values(
                values.postgresql.enabled,
                values.external_postgresql,
            ),
            elasticsearch: DatastoreConfig::from_values(
                values.elasticsearch.enabled,
                values.external_elasticsearch,
            ),
            managed_by: managed_by.to_string(),
        }
    }

    /// This is the `.Chart.Name`.
    pub fn chart_name(&self) -> &str {
        self.chart_name.as_str()
    }

    /// This is the `.Chart.Version`.
    pub fn chart_version(&self) -> &str {
        self.chart_version.as_str()
    }

    /// This is the `.Chart.AppVersion`, if it is set and non-empty.
    pub fn app_version(&self) -> Option<&str> {
        non_empty(&self.app_version)
    }

    /// This is the `.Release.Name`.
    pub fn release_name(&self) -> &str {
        self.release_name.as_str()
    }

    /// This is `.Values.nameOverride`, if non-empty.
    pub fn name_override(&self) -> Option<&str> {
        non_empty(&self.name_override)
    }

    /// This is `.Values.fullnameOverride`, if non-empty.
    pub fn fullname_override(&self) -> Option<&str> {
        non_empty(&self.fullname_override)
    }

    pub fn service_account(&self) -> &ServiceAccountConfig {
        &self.service_account
    }

    /// Relational datastore settings.
    pub fn postgresql(&self) -> &DatastoreConfig {
        &self.postgresql
    }

    /// Search-index datastore settings.
    pub fn elasticsearch(&self) -> &DatastoreConfig {
        &self.elasticsearch
    }

    /// This is the `.Release.Service`, i.e. the tool which deploys the release.
    pub fn managed_by(&self) -> &str {
        self.managed_by.as_str()
    }
}

/// This is a builder for ReleaseConfig.
#[derive(Default)]
pub struct ReleaseConfigBuilder {
    chart_name: Option<String>,
    chart_version: Option<String>,
    app_version: Option<String>,
    release_name: Option<String>,
    name_override: Option<String>,
    fullname_override: Option<String>,
    service_account: ServiceAccountConfig,
    postgresql: DatastoreConfig,
    elasticsearch: DatastoreConfig,
    managed_by: Option<String>,
}

impl ReleaseConfigBuilder {
    /// This is a builder option to set the chart name.
    #[must_use]
    pub fn with_chart_name<J>(mut self, chart_name: J) -> Self
    where
        J: ToString,
    {
        self.chart_name = Some(chart_name.to_string());
        self
    }

    /// This is a builder option to set the chart version.
    #[must_use]
    pub fn with_chart_version<J>(mut self, chart_version: J) -> Self
    where
        J: ToString,
    {
        self.chart_version = Some(chart_version.to_string());
        self
    }

    /// This is a builder option to set the application version.
    #[must_use]
    pub fn with_app_version<J>(mut self, app_version: J) -> Self
    where
        J: ToString,
    {
        self.app_version = Some(app_version.to_string());
        self
    }

    /// This is a builder option to set the release name.
    #[must_use]
    pub fn with_release_name<J>(mut self, release_name: J) -> Self
    where
        J: ToString,
    {
        self.release_name = Some(release_name.to_string());
        self
    }

    #[must_use]
    pub fn with_name_override<J>(mut self, name_override: J) -> Self
    where
        J: ToString,
    {
        self.name_override = Some(name_override.to_string());
        self
    }

    #[must_use]
    pub fn with_fullname_override<J>(mut self, fullname_override: J) -> Self
    where
        J: ToString,
    {
        self.fullname_override = Some(fullname_override.to_string());
        self
    }

    /// This is a builder option to set the serviceAccount values.
    #[must_use]
    pub fn with_service_account(mut self, service_account: ServiceAccountConfig) -> Self {
        self.service_account = service_account;
        self
    }

    #[must_use]
    pub fn with_postgresql(mut self, postgresql: DatastoreConfig) -> Self {
        self.postgresql = postgresql;
        self
    }

    #[must_use]
    pub fn with_elasticsearch(mut self, elasticsearch: DatastoreConfig) -> Self {
        self.elasticsearch = elasticsearch;
        self
    }

    /// This is a builder option to set the managed-by identifier. Defaults to "Helm".
    #[must_use]
    pub fn with_managed_by<J>(mut self, managed_by: J) -> Self
    where
        J: ToString,
    {
        self.managed_by = Some(managed_by.to_string());
        self
    }

    /// This builds the ReleaseConfig object.
    pub fn build(self) -> Result<ReleaseConfig> {
        let (Some(chart_name), Some(chart_version), Some(release_name)) =
            (self.chart_name, self.chart_version, self.release_name)
        else {
            return ReleaseOptionsAbsent.fail();
        };

        Ok(ReleaseConfig {
            chart_name,
            chart_version,
            app_version: self.app_version,
            release_name,
            name_override: self.name_override,
            fullname_override: self.fullname_override,
            service_account: self.service_account,
            postgresql: self.postgresql,
            elasticsearch: self.elasticsearch,
            managed_by: self
                .managed_by
                .unwrap_or_else(|| DEFAULT_MANAGED_BY.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        common::error::Error,
        release::{DatastoreConfig, ReleaseConfig, ServiceAccountConfig},
    };

    #[test]
    fn test_builder_defaults() {
        let cfg = ReleaseConfig::builder()
            .with_chart_name("temporal-platform")
            .with_chart_version("0.1.0")
            .with_release_name("demo")
            .build()
            .unwrap();

        assert_eq!(cfg.managed_by(), "Helm");
        assert_eq!(cfg.app_version(), None);
        assert_eq!(cfg.service_account(), &ServiceAccountConfig::new(true, None));
        assert!(!cfg.postgresql().enabled());
        assert_eq!(cfg.elasticsearch().external_host(), "");
    }

    #[test]
    fn test_builder_missing_release_name() {
        let result = ReleaseConfig::builder()
            .with_chart_name("temporal-platform")
            .with_chart_version("0.1.0")
            .build();

        assert!(matches!(result, Err(Error::ReleaseOptionsAbsent)));
    }

    #[test]
    fn test_empty_overrides_are_absent() {
        let cfg = ReleaseConfig::builder()
            .with_chart_name("temporal-platform")
            .with_chart_version("0.1.0")
            .with_release_name("demo")
            .with_name_override("")
            .with_fullname_override("")
            .with_app_version("")
            .with_service_account(ServiceAccountConfig::new(false, Some(String::new())))
            .build()
            .unwrap();

        assert_eq!(cfg.name_override(), None);
        assert_eq!(cfg.fullname_override(), None);
        assert_eq!(cfg.app_version(), None);
        assert_eq!(cfg.service_account().name(), None);
    }

    #[test]
    fn test_external_datastore_options() {
        let store = DatastoreConfig::external("pg.example.com")
            .with_port(Some(6432))
            .with_scheme(Some("https".to_string()));

        assert!(!store.enabled());
        assert_eq!(store.external_host(), "pg.example.com");
        assert_eq!(store.external_port(), Some(6432));
        assert_eq!(store.external_scheme(), Some("https"));
        assert!(DatastoreConfig::in_cluster().enabled());
    }
}
