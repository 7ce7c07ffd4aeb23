use crate::common::error::{
    ReadingFile, Result, U8VectorToString, ValuesConversion, YamlMerge, YamlParseFromFile,
    YamlParseFromSlice,
};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use snafu::ResultExt;
use std::{fs::read, path::Path, str};
use tracing::debug;

/// This is used to deserialize the parts of a values.yaml which the naming helpers read. Every
/// key is optional, absent keys take the chart defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all(deserialize = "camelCase"))]
pub struct Values {
    pub(crate) name_override: Option<String>,
    pub(crate) fullname_override: Option<String>,
    pub(crate) service_account: ServiceAccountValues,
    /// Toggles the PostgreSQL sub-chart.
    pub(crate) postgresql: Toggle,
    pub(crate) external_postgresql: ExternalDatastoreValues,
    /// Toggles the Elasticsearch sub-chart.
    pub(crate) elasticsearch: Toggle,
    pub(crate) external_elasticsearch: ExternalDatastoreValues,
}

/// The `serviceAccount` block.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServiceAccountValues {
    pub(crate) create: bool,
    pub(crate) name: Option<String>,
}

impl Default for ServiceAccountValues {
    fn default() -> Self {
        Self {
            create: true,
            name: None,
        }
    }
}

/// A sub-chart's `enabled` toggle.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Toggle {
    pub(crate) enabled: bool,
}

/// Connection details of a datastore which is not deployed by this release.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ExternalDatastoreValues {
    pub(crate) host: String,
    pub(crate) port: Option<u16>,
    pub(crate) scheme: Option<String>,
}

impl TryFrom<&[u8]> for Values {
    type Error = crate::common::error::Error;

    fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
        let mapping: Mapping = serde_yaml::from_slice(buf).context(YamlParseFromSlice {
            input_yaml: str::from_utf8(buf).context(U8VectorToString)?.to_string(),
        })?;

        Self::from_mapping(mapping)
    }
}

impl Values {
    /// Read the chart's default values file and layer the user's values files on top of it, in
    /// order. Later files take precedence, like `helm install -f a.yaml -f b.yaml`.
    pub fn from_layers<P>(chart_values: &Path, overrides: &[P]) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let mut merged = read_values_file(chart_values)?;

        for path in overrides {
            let path = path.as_ref();
            debug!(filepath=%path.display(), "Merging values file");
            merge_values(&mut merged, read_values_file(path)?);
        }

        Self::from_mapping(merged)
    }

    /// Convert a values mapping. Null values, at any depth, are unset and take the defaults.
    fn from_mapping(values: Mapping) -> Result<Self> {
        let mut set = Mapping::new();
        merge_values(&mut set, values);

        serde_yaml::from_value(Value::Mapping(set)).context(ValuesConversion)
    }
}

/// Reads a values file into a YAML mapping. An empty file is an empty mapping.
fn read_values_file(path: &Path) -> Result<Mapping> {
    let buf = read(path).context(ReadingFile {
        filepath: path.to_path_buf(),
    })?;
    if buf.iter().all(u8::is_ascii_whitespace) {
        return Ok(Mapping::new());
    }

    let value: Value = serde_yaml::from_slice(buf.as_slice()).context(YamlParseFromFile {
        filepath: path.to_path_buf(),
    })?;

    match value {
        Value::Null => Ok(Mapping::new()),
        Value::Mapping(mapping) => Ok(mapping),
        _ => YamlMerge {
            filepath: path.to_path_buf(),
        }
        .fail(),
    }
}

/// Deep-merges `overlay` into `base`. Nested mappings are merged key by key, any other value
/// replaces the one in `base`, and a null in `overlay` removes the key. Nulls in `overlay` never
/// end up in `base`.
pub fn merge_values(base: &mut Mapping, overlay: Mapping) {
    for (key, value) in overlay {
        match value {
            Value::Null => {
                base.remove(&key);
            }
            Value::Mapping(overlay_child) => match base.get_mut(&key) {
                Some(Value::Mapping(base_child)) => merge_values(base_child, overlay_child),
                _ => {
                    let mut child = Mapping::new();
                    merge_values(&mut child, overlay_child);
                    base.insert(key, Value::Mapping(child));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::helm::values::{merge_values, Values};
    use serde_yaml::{Mapping, Value};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn mapping(yaml: &str) -> Mapping {
        match serde_yaml::from_str::<Value>(yaml).unwrap() {
            Value::Mapping(mapping) => mapping,
            other => panic!("not a mapping: {other:?}"),
        }
    }

    fn tempfile_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_values_defaults() {
        let values = Values::try_from("{}".as_bytes()).unwrap();

        assert!(values.service_account.create);
        assert!(values.service_account.name.is_none());
        assert!(!values.postgresql.enabled);
        assert!(!values.elasticsearch.enabled);
        assert_eq!(values.external_postgresql.host, "");
        assert!(values.name_override.is_none());
    }

    #[test]
    fn test_values_yaml() {
        let values = Values::try_from(
            r#"
nameOverride: temporal
serviceAccount:
  create: false
  name: ops
postgresql:
  enabled: true
externalElasticsearch:
  host: es.example.com
  port: 9243
  scheme: https
server:
  replicaCount: 3
"#
            .as_bytes(),
        )
        .unwrap();

        assert_eq!(values.name_override.as_deref(), Some("temporal"));
        assert!(!values.service_account.create);
        assert_eq!(values.service_account.name.as_deref(), Some("ops"));
        assert!(values.postgresql.enabled);
        assert_eq!(values.external_elasticsearch.host, "es.example.com");
        assert_eq!(values.external_elasticsearch.port, Some(9243));
        assert_eq!(values.external_elasticsearch.scheme.as_deref(), Some("https"));
    }

    #[test]
    fn test_merge_values() {
        let mut base = mapping(
            r#"
postgresql:
  enabled: true
  auth:
    database: temporal
externalPostgresql:
  host: ""
nameOverride: temporal
"#,
        );
        let overlay = mapping(
            r#"
postgresql:
  enabled: false
externalPostgresql:
  host: pg.example.com
nameOverride: null
"#,
        );

        merge_values(&mut base, overlay);

        assert_eq!(
            base,
            mapping(
                r#"
postgresql:
  enabled: false
  auth:
    database: temporal
externalPostgresql:
  host: pg.example.com
"#
            )
        );
    }

    #[test]
    fn test_values_from_layers() {
        let chart_values = tempfile_with("postgresql:\n  enabled: true\nnameOverride: base\n");
        let first = tempfile_with("nameOverride: first\n");
        let second = tempfile_with(
            "postgresql:\n  enabled: false\nexternalPostgresql:\n  host: pg.example.com\n",
        );
        let empty = tempfile_with("");

        let values = Values::from_layers(
            chart_values.path(),
            &[first.path(), second.path(), empty.path()],
        )
        .unwrap();

        assert_eq!(values.name_override.as_deref(), Some("first"));
        assert!(!values.postgresql.enabled);
        assert_eq!(values.external_postgresql.host, "pg.example.com");
    }

    #[test]
    fn test_values_from_layers_not_a_mapping() {
        let chart_values = tempfile_with("- a\n- b\n");
        let overrides: [&std::path::Path; 0] = [];

        assert!(Values::from_layers(chart_values.path(), &overrides).is_err());
    }

    #[test]
    fn test_null_values_are_unset() {
        let values = Values::try_from(
            r#"
nameOverride:
serviceAccount:
externalPostgresql:
  host:
  port:
externalElasticsearch:
  host: ~
  scheme: null
"#
            .as_bytes(),
        )
        .unwrap();

        assert!(values.name_override.is_none());
        assert!(values.service_account.create);
        assert_eq!(values.external_postgresql.host, "");
        assert!(values.external_postgresql.port.is_none());
        assert_eq!(values.external_elasticsearch.host, "");
        assert!(values.external_elasticsearch.scheme.is_none());
    }

    #[test]
    fn test_merge_values_drops_nested_nulls() {
        let mut base = Mapping::new();
        merge_values(
            &mut base,
            mapping("serviceAccount:\n  create: false\n  name:\n"),
        );

        assert_eq!(base, mapping("serviceAccount:\n  create: false\n"));
    }
}
