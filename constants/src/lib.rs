/// Maximum length of a Kubernetes object name which must be a valid DNS label (RFC 1123).
pub const DNS_LABEL_MAX_LEN: usize = 63;

/// Label key carrying the `<chart>-<version>` identifier.
pub const HELM_CHART_LABEL_KEY: &str = "helm.sh/chart";

/// Standard label for the name of the application.
pub const K8S_NAME_LABEL_KEY: &str = "app.kubernetes.io/name";

/// Standard label for a unique name identifying the instance of an application.
pub const K8S_INSTANCE_LABEL_KEY: &str = "app.kubernetes.io/instance";

/// Standard label for the version of the application.
pub const K8S_VERSION_LABEL_KEY: &str = "app.kubernetes.io/version";

/// Standard label for the tool being used to manage the operation of an application.
pub const K8S_MANAGED_BY_LABEL_KEY: &str = "app.kubernetes.io/managed-by";

/// Standard label for the component within the architecture.
pub const K8S_COMPONENT_LABEL_KEY: &str = "app.kubernetes.io/component";

/// Defines the default value of the managed-by label, i.e. the Helm `.Release.Service`.
pub const DEFAULT_MANAGED_BY: &str = "Helm";

/// The ServiceAccount every Namespace has, used when none is created or named.
pub const DEFAULT_SERVICE_ACCOUNT_NAME: &str = "default";

/// Name suffix of the co-deployed PostgreSQL Service.
pub const POSTGRESQL_HOST_SUFFIX: &str = "postgresql";

/// Name suffix of the co-deployed Elasticsearch master Service.
pub const ELASTICSEARCH_HOST_SUFFIX: &str = "elasticsearch-master";

/// PostgreSQL listens here unless told otherwise.
pub const POSTGRESQL_DEFAULT_PORT: u16 = 5432;

/// Elasticsearch HTTP API port.
pub const ELASTICSEARCH_DEFAULT_PORT: u16 = 9200;

/// Elasticsearch HTTP API scheme.
pub const ELASTICSEARCH_DEFAULT_SCHEME: &str = "http";

/// Helm chart metadata file.
pub const CHART_YAML: &str = "Chart.yaml";

/// Helm chart default values file.
pub const VALUES_YAML: &str = "values.yaml";
