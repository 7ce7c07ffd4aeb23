use crate::opts::{CliArgs, OutputFormat};
use clap::Parser;
use release_resolver::{
    datastore::Datastore, helm::directory::load_release, ResolvedRelease, Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod opts;

fn main() -> Result<()> {
    init_logging();

    let opts = CliArgs::parse();

    render(&opts).map_err(|error| {
        error!(%error, "Failed to resolve release {}", opts.release_name());
        error
    })
}

/// Initialize logging components -- tracing. Logs go to stderr, stdout carries the output.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Load the release from the chart directory, resolve it and print it.
fn render(opts: &CliArgs) -> Result<()> {
    let cfg = load_release(
        opts.chart_dir().as_path(),
        opts.values(),
        opts.release_name(),
        opts.managed_by(),
    )?;

    let resolved = if opts.strict() {
        ResolvedRelease::resolve_strict(&cfg)?
    } else {
        ResolvedRelease::resolve(&cfg)
    };
    info!(fullname = resolved.fullname(), "Resolved release");

    match opts.output() {
        OutputFormat::Yaml => print!("{}", resolved.to_yaml()?),
        OutputFormat::Json => println!("{}", resolved.to_json()?),
        OutputFormat::Table => {
            console_logger::key_values(
                &format!("Release {}", cfg.release_name()),
                resolved.rows().as_slice(),
            );
            if !opts.strict() {
                for (datastore, resolved) in [
                    (Datastore::Postgresql, resolved.postgresql()),
                    (Datastore::Elasticsearch, resolved.elasticsearch()),
                ] {
                    if resolved.host().host().trim().is_empty() {
                        let message = format!("Datastore {datastore} has no host");
                        console_logger::warn(
                            &message,
                            "Set its external host, or enable the in-cluster instance",
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
