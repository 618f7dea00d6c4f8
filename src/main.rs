use std::io::IsTerminal;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use composer_outdated::audit::report::{render_platform_bounds, render_table};
use composer_outdated::config::{AuditConfig, LogFormat};
use composer_outdated::version::registries::PackagistRegistry;

#[derive(Parser)]
#[command(name = "composer-outdated")]
#[command(version, about = "Report outdated Composer dependencies")]
struct Cli {
    /// Directory containing composer.json and composer.lock (defaults to the current directory)
    #[arg(value_name = "DIR")]
    location: Option<PathBuf>,
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Compact => builder
            .compact()
            .with_ansi(std::io::stderr().is_terminal())
            .init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli, config: AuditConfig) -> anyhow::Result<()> {
    let registry = PackagistRegistry::new(&config.registry_url, config.fetch_timeout())?;

    let report =
        composer_outdated::audit::run(cli.location.as_deref(), &config, &registry).await?;

    println!("{}", render_table(&report.findings));
    println!("{}", render_platform_bounds(&report.platform));

    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(LogFormat::from_env());
    let config = AuditConfig::from_env();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run(cli, config))
}
