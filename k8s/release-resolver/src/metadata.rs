use crate::{
    common::error::{InvalidResourceName, RegexCompile, Result},
    naming::{common_labels, resolve_fullname, selector_labels, truncate_dns_label, Labels},
    release::ReleaseConfig,
};
use constants::{DNS_LABEL_MAX_LEN, K8S_COMPONENT_LABEL_KEY};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use regex::Regex;
use snafu::{ensure, ResultExt};

/// RFC 1123 label: lowercase alphanumerics and '-', starting and ending with an alphanumeric.
const DNS_LABEL_REGEX: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";

/// Name of a resource of the release, `<fullname>` or `<fullname>-<component>`.
pub fn resource_name(cfg: &ReleaseConfig, component: Option<&str>) -> String {
    match component {
        Some(component) => {
            truncate_dns_label(&format!("{}-{component}", resolve_fullname(cfg)))
        }
        None => resolve_fullname(cfg),
    }
}

fn with_component(mut labels: Labels, component: Option<&str>) -> Labels {
    if let Some(component) = component {
        labels.insert(K8S_COMPONENT_LABEL_KEY.to_string(), component.to_string());
    }
    labels
}

/// ObjectMeta for a resource of the release, carrying its name and the common labels.
pub fn object_meta(cfg: &ReleaseConfig, component: Option<&str>) -> ObjectMeta {
    ObjectMeta {
        name: Some(resource_name(cfg, component)),
        labels: Some(with_component(common_labels(cfg), component)),
        ..Default::default()
    }
}

/// LabelSelector which matches the resources created with [`object_meta`] for the same component.
pub fn label_selector(cfg: &ReleaseConfig, component: Option<&str>) -> LabelSelector {
    LabelSelector {
        match_labels: Some(with_component(selector_labels(cfg), component)),
        ..Default::default()
    }
}

/// Validate that `name` may be used as a Kubernetes object name which is a DNS label.
pub fn validate_dns_label(name: &str) -> Result<()> {
    let regex = Regex::new(DNS_LABEL_REGEX).context(RegexCompile {
        expression: DNS_LABEL_REGEX.to_string(),
    })?;

    ensure!(
        name.len() <= DNS_LABEL_MAX_LEN && regex.is_match(name),
        InvalidResourceName { name }
    );

    Ok(())
}
