use clap::{Parser, ValueEnum};
use constants::DEFAULT_MANAGED_BY;
use std::path::PathBuf;

/// Output formats for the resolved release.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Yaml,
    Json,
    Table,
}

/// These are the supported cli configuration options.
#[derive(Parser)]
#[command(name = "release-resolver", version)]
#[command(
    about = "Resolves the names, labels and datastore hosts of a Helm release",
    long_about = None
)]
pub(crate) struct CliArgs {
    /// This is the directory of the Helm chart, containing Chart.yaml and values.yaml.
    #[arg(long, env = "CHART_DIR", value_name = "DIR_PATH")]
    chart_dir: PathBuf,

    /// This is the release name of the Helm chart.
    #[arg(long)]
    release_name: String,

    /// Values files layered on top of the chart's values.yaml, later files take precedence.
    #[arg(short = 'f', long = "values", value_name = "FILE_PATH")]
    values: Vec<PathBuf>,

    /// The tool which manages the release, used for the managed-by label.
    #[arg(long, env = "HELM_SERVICE", default_value = DEFAULT_MANAGED_BY)]
    managed_by: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Yaml)]
    output: OutputFormat,

    /// If set, a datastore without a usable host or an invalid resource name is an error.
    #[arg(long, default_value_t = false)]
    strict: bool,
}

impl CliArgs {
    /// This returns the Helm chart directory.
    pub(crate) fn chart_dir(&self) -> PathBuf {
        self.chart_dir.clone()
    }

    /// This returns the Helm release name.
    pub(crate) fn release_name(&self) -> String {
        self.release_name.clone()
    }

    /// This returns the user values files, in order.
    pub(crate) fn values(&self) -> &[PathBuf] {
        self.values.as_slice()
    }

    pub(crate) fn managed_by(&self) -> String {
        self.managed_by.clone()
    }

    pub(crate) fn output(&self) -> OutputFormat {
        self.output
    }

    /// This is a predicate to decide if misconfigurations fail the render.
    pub(crate) fn strict(&self) -> bool {
        self.strict
    }
}
