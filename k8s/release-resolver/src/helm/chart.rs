use crate::common::error::{ReadingFile, U8VectorToString, YamlParseFromFile, YamlParseFromSlice};
use semver::Version;
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_yaml::Value;
use snafu::ResultExt;
use std::{fs::read, path::Path, str};

/// This struct is used to deserialize helm charts' Chart.yaml file.
#[derive(Debug, Deserialize)]
pub struct Chart {
    /// This is the name of the helm chart.
    name: String,
    /// This is the version of the helm chart.
    version: Version,
    /// This is the version of the application the chart deploys. It is free-form, and
    /// unquoted YAML numbers are accepted.
    #[serde(
        default,
        rename(deserialize = "appVersion"),
        deserialize_with = "scalar_to_string"
    )]
    app_version: Option<String>,
}

impl Chart {
    /// This is a getter for the helm chart name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// This is a getter for the helm chart version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// This is a getter for the application version, if any.
    pub fn app_version(&self) -> Option<&str> {
        self.app_version.as_deref()
    }
}

impl TryFrom<&Path> for Chart {
    type Error = crate::common::error::Error;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let buf = read(path).context(ReadingFile {
            filepath: path.to_path_buf(),
        })?;

        serde_yaml::from_slice(buf.as_slice()).context(YamlParseFromFile {
            filepath: path.to_path_buf(),
        })
    }
}

impl TryFrom<&[u8]> for Chart {
    type Error = crate::common::error::Error;

    fn try_from(buf: &[u8]) -> Result<Self, Self::Error> {
        serde_yaml::from_slice(buf).context(YamlParseFromSlice {
            input_yaml: str::from_utf8(buf).context(U8VectorToString)?.to_string(),
        })
    }
}

fn scalar_to_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(Value::Number(value)) => Ok(Some(value.to_string())),
        Some(Value::Bool(value)) => Ok(Some(value.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a scalar appVersion, found {other:?}"
        ))),
    }
}
