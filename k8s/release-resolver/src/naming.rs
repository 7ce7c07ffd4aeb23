//! Name and label derivation for the resources of a release. Every function here is a pure
//! function of the [`ReleaseConfig`]: it never fails, never reads ambient state, and returns the
//! same output for the same input.

use crate::release::ReleaseConfig;
use constants::{
    DEFAULT_SERVICE_ACCOUNT_NAME, DNS_LABEL_MAX_LEN, HELM_CHART_LABEL_KEY,
    K8S_INSTANCE_LABEL_KEY, K8S_MANAGED_BY_LABEL_KEY, K8S_NAME_LABEL_KEY, K8S_VERSION_LABEL_KEY,
};
use std::collections::BTreeMap;

/// Labels are kept sorted by key, so rendering them is deterministic.
pub type Labels = BTreeMap<String, String>;

/// Cuts `name` down to the DNS label length limit and strips trailing '-'. The limit counts
/// characters, a multi-byte character is never split.
pub fn truncate_dns_label(name: &str) -> String {
    let truncated = match name.char_indices().nth(DNS_LABEL_MAX_LEN) {
        Some((end, _)) => &name[..end],
        None => name,
    };
    truncated.trim_end_matches('-').to_string()
}

/// The name of the chart, or `nameOverride` when one is set.
fn base_name(cfg: &ReleaseConfig) -> &str {
    cfg.name_override().unwrap_or(cfg.chart_name())
}

/// Expands the name of the chart.
pub fn resolve_name(cfg: &ReleaseConfig) -> String {
    truncate_dns_label(base_name(cfg))
}

/// Creates a default fully qualified app name. If the release name contains the chart name it
/// is used as the full name, so that e.g. release "foo-chart" of chart "chart" does not become
/// "foo-chart-chart".
pub fn resolve_fullname(cfg: &ReleaseConfig) -> String {
    if let Some(fullname) = cfg.fullname_override() {
        return truncate_dns_label(fullname);
    }

    let name = base_name(cfg);
    if cfg.release_name().contains(name) {
        truncate_dns_label(cfg.release_name())
    } else {
        truncate_dns_label(&format!("{}-{name}", cfg.release_name()))
    }
}

/// Creates the chart name and version as used by the chart label. A '+' is not allowed in a
/// label value, so SemVer build metadata gets a '_' instead.
pub fn resolve_chart_label(cfg: &ReleaseConfig) -> String {
    let chart = format!("{}-{}", cfg.chart_name(), cfg.chart_version()).replace('+', "_");
    truncate_dns_label(&chart)
}

/// Selector labels. These match live resources to their controllers and must not change for an
/// installed release.
pub fn selector_labels(cfg: &ReleaseConfig) -> Labels {
    Labels::from([
        (K8S_NAME_LABEL_KEY.to_string(), resolve_name(cfg)),
        (
            K8S_INSTANCE_LABEL_KEY.to_string(),
            cfg.release_name().to_string(),
        ),
    ])
}

/// Common labels, a superset of the selector labels.
pub fn common_labels(cfg: &ReleaseConfig) -> Labels {
    let mut labels = selector_labels(cfg);
    labels.insert(HELM_CHART_LABEL_KEY.to_string(), resolve_chart_label(cfg));
    if let Some(app_version) = cfg.app_version() {
        labels.insert(K8S_VERSION_LABEL_KEY.to_string(), app_version.to_string());
    }
    labels.insert(
        K8S_MANAGED_BY_LABEL_KEY.to_string(),
        cfg.managed_by().to_string(),
    );
    labels
}

/// Creates the name of the service account to use.
pub fn resolve_service_account_name(cfg: &ReleaseConfig) -> String {
    let service_account = cfg.service_account();
    match (service_account.create(), service_account.name()) {
        (_, Some(name)) => name.to_string(),
        (true, None) => resolve_fullname(cfg),
        (false, None) => DEFAULT_SERVICE_ACCOUNT_NAME.to_string(),
    }
}

/// Picks the host of a backing datastore: the co-deployed `<fullname>-<suffix>` Service when the
/// datastore is enabled, else `external_host` as given, even if it is empty.
pub fn resolve_datastore_host(
    enabled: bool,
    generated_suffix: &str,
    external_host: &str,
    cfg: &ReleaseConfig,
) -> String {
    if enabled {
        format!("{}-{generated_suffix}", resolve_fullname(cfg))
    } else {
        external_host.to_string()
    }
}
