/// Contains the structs required to deserialize Chart.yaml files.
pub mod chart;

/// Contains tools to validate a chart directory and load a ReleaseConfig from it.
pub mod directory;

/// Contains the structs required to deserialize values.yaml files, and values layering.
pub mod values;
