use snafu::Snafu;
use std::path::PathBuf;

/// For use with multiple fallible operations which may fail for different reasons, but are
/// defined withing the same scope and must return to the outer scope (calling scope) using
/// the try operator -- '?'.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))]
pub enum Error {
    /// Error for when a datastore is neither deployed in-cluster nor pointed at an external host.
    #[snafu(display("Invalid {} configuration: {}", datastore, reason))]
    InvalidConfiguration { datastore: String, reason: String },

    /// Error for when a derived name is not a valid RFC 1123 DNS label.
    #[snafu(display("'{}' is not a valid DNS-1123 label", name))]
    InvalidResourceName { name: String },

    /// Error for when regular expression parsing or compilation fails.
    #[snafu(display("Failed to compile regex {}: {}", expression, source))]
    RegexCompile {
        source: regex::Error,
        expression: String,
    },

    /// Error for when mandatory options for a ReleaseConfig are absent.
    #[snafu(display("Chart name, chart version and release name are mandatory"))]
    ReleaseOptionsAbsent,

    /// Error for when the path to a directory cannot be validated.
    #[snafu(display("Failed to validate directory path {}: {}", path.display(), source))]
    ValidateDirPath {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the path to a file cannot be validated.
    #[snafu(display("Failed to validate filepath {}: {}", path.display(), source))]
    ValidateFilePath {
        source: std::io::Error,
        path: PathBuf,
    },

    /// Error for when the path is not that of a directory.
    #[snafu(display("{} is not a directory", path.display()))]
    NotADirectory { path: PathBuf },

    /// Error for when the path is not that of a file.
    #[snafu(display("{} is not a file", path.display()))]
    NotAFile { path: PathBuf },

    /// Error for when reading a file fails.
    #[snafu(display("Failed to read file {}: {}", filepath.display(), source))]
    ReadingFile {
        source: std::io::Error,
        filepath: PathBuf,
    },

    /// Error for when yaml could not be parsed from a file.
    #[snafu(display("Failed to parse YAML at {}: {}", filepath.display(), source))]
    YamlParseFromFile {
        source: serde_yaml::Error,
        filepath: PathBuf,
    },

    /// Error for when yaml could not be parsed from a slice.
    #[snafu(display("Failed to parse YAML {}: {}", input_yaml, source))]
    YamlParseFromSlice {
        source: serde_yaml::Error,
        input_yaml: String,
    },

    /// Error for when a values file does not have a mapping at the top level.
    #[snafu(display("Values file {} is not a YAML mapping", filepath.display()))]
    YamlMerge { filepath: PathBuf },

    /// Error for when merged values could not be converted into typed values.
    #[snafu(display("Failed to convert merged values: {}", source))]
    ValuesConversion { source: serde_yaml::Error },

    /// Error for use when converting Vec<> to String.
    #[snafu(display("Failed to convert Vec<u8> to UTF-8 formatted String: {}", source))]
    U8VectorToString { source: std::str::Utf8Error },

    /// Error for when the resolved release could not be serialized to YAML.
    #[snafu(display("Failed to serialize to YAML: {}", source))]
    SerializeYaml { source: serde_yaml::Error },

    /// Error for when the resolved release could not be serialized to JSON.
    #[snafu(display("Failed to serialize to JSON: {}", source))]
    SerializeJson { source: serde_json::Error },
}

/// A wrapper type to remove repeated Result<T, Error> returns.
pub type Result<T, E = Error> = std::result::Result<T, E>;
