use crate::{
    common::error::{NotADirectory, NotAFile, Result, ValidateDirPath, ValidateFilePath},
    helm::{chart::Chart, values::Values},
    release::ReleaseConfig,
};
use constants::{CHART_YAML, VALUES_YAML};
use snafu::{ensure, ResultExt};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

fn path_exists_and_is_dir(path: &Path) -> Result<bool> {
    fs::metadata(path)
        .map(|m| m.is_dir())
        .context(ValidateDirPath {
            path: path.to_path_buf(),
        })
}

fn path_exists_and_is_file(path: &Path) -> Result<bool> {
    fs::metadata(path)
        .map(|m| m.is_file())
        .context(ValidateFilePath {
            path: path.to_path_buf(),
        })
}

/// Validate the input helm chart directory path:
/// - validate if the path exists and is a directory.
/// - validate if the Chart.yaml file is present.
/// - validate if the values.yaml file is present.
pub fn validate_chart_dir(dir_path: &Path) -> Result<()> {
    ensure!(
        path_exists_and_is_dir(dir_path)?,
        NotADirectory {
            path: dir_path.to_path_buf()
        }
    );

    for file in [CHART_YAML, VALUES_YAML] {
        let path = dir_path.join(file);
        ensure!(path_exists_and_is_file(path.as_path())?, NotAFile { path });
    }

    Ok(())
}

/// Validate that every user values file exists.
pub fn validate_values_files(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        ensure!(
            path_exists_and_is_file(path.as_path())?,
            NotAFile { path: path.clone() }
        );
    }

    Ok(())
}

/// Load the ReleaseConfig for installing the chart in `chart_dir` as `release_name`, with the
/// user's values files layered on top of the chart's values.yaml.
pub fn load_release<R, M>(
    chart_dir: &Path,
    values_files: &[PathBuf],
    release_name: R,
    managed_by: M,
) -> Result<ReleaseConfig>
where
    R: ToString,
    M: ToString,
{
    validate_chart_dir(chart_dir)?;
    validate_values_files(values_files)?;

    let chart = Chart::try_from(chart_dir.join(CHART_YAML).as_path())?;
    debug!(name = chart.name(), version = %chart.version(), "Read Chart.yaml");

    let values = Values::from_layers(chart_dir.join(VALUES_YAML).as_path(), values_files)?;

    let cfg = ReleaseConfig::from_chart(&chart, values, release_name, managed_by);
    info!(
        chart = cfg.chart_name(),
        release = cfg.release_name(),
        "Loaded release configuration"
    );

    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use crate::{
        common::error::Error,
        helm::directory::{load_release, validate_chart_dir},
        naming::{resolve_fullname, resolve_service_account_name},
        release::{DatastoreConfig, ReleaseConfig},
        render::ResolvedRelease,
    };
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    const CHART: &str = r#"
apiVersion: v2
name: temporal-platform
version: 1.2.3+build5
appVersion: "1.22.0"
"#;

    const VALUES: &str = r#"
nameOverride: ""
fullnameOverride: ""
serviceAccount:
  create: true
  name: ""
postgresql:
  enabled: true
externalPostgresql:
  host: ""
elasticsearch:
  enabled: false
externalElasticsearch:
  host: es.example.com
"#;

    fn chart_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Chart.yaml"), CHART).unwrap();
        fs::write(dir.path().join("values.yaml"), VALUES).unwrap();
        dir
    }

    #[test]
    fn test_load_release_matches_builder() {
        let dir = chart_dir();
        let no_overrides: [PathBuf; 0] = [];
        let loaded = load_release(dir.path(), &no_overrides, "demo", "Helm").unwrap();

        let built = ReleaseConfig::builder()
            .with_chart_name("temporal-platform")
            .with_chart_version("1.2.3+build5")
            .with_app_version("1.22.0")
            .with_release_name("demo")
            .with_name_override("")
            .with_fullname_override("")
            .with_postgresql(DatastoreConfig::in_cluster())
            .with_elasticsearch(DatastoreConfig::external("es.example.com"))
            .build()
            .unwrap();

        assert_eq!(resolve_fullname(&loaded), resolve_fullname(&built));
        assert_eq!(
            resolve_service_account_name(&loaded),
            resolve_service_account_name(&built)
        );
        assert_eq!(loaded.chart_version(), "1.2.3+build5");
        assert_eq!(loaded.postgresql(), built.postgresql());
        assert_eq!(loaded.elasticsearch(), built.elasticsearch());
    }

    #[test]
    fn test_load_release_with_values_files() {
        let dir = chart_dir();
        let overrides = dir.path().join("prod.yaml");
        fs::write(
            &overrides,
            r#"
fullnameOverride: workflows
postgresql:
  enabled: false
externalPostgresql:
  host: pg.example.com
  port: 6432
"#,
        )
        .unwrap();

        let cfg = load_release(dir.path(), &[overrides], "demo", "Helm").unwrap();

        assert_eq!(resolve_fullname(&cfg), "workflows");
        assert!(!cfg.postgresql().enabled());
        assert_eq!(cfg.postgresql().external_host(), "pg.example.com");
        assert_eq!(cfg.postgresql().external_port(), Some(6432));
    }

    #[test]
    fn test_validate_chart_dir() {
        let dir = chart_dir();
        assert!(validate_chart_dir(dir.path()).is_ok());

        fs::remove_file(dir.path().join("values.yaml")).unwrap();
        assert!(matches!(
            validate_chart_dir(dir.path()),
            Err(Error::ValidateFilePath { .. })
        ));

        let file = dir.path().join("Chart.yaml");
        assert!(matches!(
            validate_chart_dir(file.as_path()),
            Err(Error::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_load_release_with_null_values() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Chart.yaml"), CHART).unwrap();
        fs::write(
            dir.path().join("values.yaml"),
            r#"
serviceAccount:
  name:
postgresql:
  enabled: false
externalPostgresql:
  host:
"#,
        )
        .unwrap();
        let no_overrides: [PathBuf; 0] = [];

        let cfg = load_release(dir.path(), &no_overrides, "demo", "Helm").unwrap();

        assert_eq!(cfg.postgresql().external_host(), "");
        assert_eq!(resolve_service_account_name(&cfg), "demo-temporal-platform");
        assert!(matches!(
            ResolvedRelease::resolve_strict(&cfg),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_load_release_missing_values_file() {
        let dir = chart_dir();
        let missing = dir.path().join("missing.yaml");

        assert!(load_release(dir.path(), &[missing], "demo", "Helm").is_err());
    }
}
