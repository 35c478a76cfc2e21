use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dataplane_setup::{Assembler, AssemblerConfig};

#[derive(Parser)]
#[command(name = "create-setup")]
#[command(about = "Combine deployment manifests into a single namespaced setup file")]
struct Cli {
    /// Directory scanned recursively for .yaml manifests [default: ../deploy]
    deploy_dir: Option<PathBuf>,

    /// Namespace injected beneath each `metadata:` line
    #[arg(long)]
    namespace: Option<String>,

    /// Manifest defining the namespace, emitted first
    #[arg(long)]
    namespace_file: Option<PathBuf>,

    /// Where the combined document is written
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Sort discovered manifests by path instead of filesystem order
    #[arg(long)]
    sort: bool,

    /// JSON config file; flags take precedence over its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Assemble everything but skip writing the output file
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<(AssemblerConfig, bool)> {
        let mut config = match &self.config {
            Some(path) => AssemblerConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => AssemblerConfig::default(),
        };

        if let Some(deploy_dir) = self.deploy_dir {
            config = config.with_deploy_dir(deploy_dir);
        }
        if let Some(namespace) = self.namespace {
            config = config.with_namespace(namespace);
        }
        if let Some(namespace_file) = self.namespace_file {
            config = config.with_namespace_file(namespace_file);
        }
        if let Some(output) = self.output {
            config = config.with_output_file(output);
        }
        if self.sort {
            config = config.with_sorted_discovery(true);
        }

        Ok((config, self.dry_run))
    }
}

/// Initialize tracing on stderr so stdout stays free for piping
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG")
            .unwrap_or_else(|_| "dataplane_setup=info,create_setup=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let (config, dry_run) = cli.into_config()?;
    let assembler = Assembler::new(config);

    let config = assembler.config();
    tracing::info!(
        "Assembling {:?} into {:?} (namespace {})",
        config.deploy_dir,
        config.output_file,
        config.namespace
    );
    tracing::debug!(
        "Resolved config: {}",
        serde_json::to_string(config).context("Failed to serialize config")?
    );

    let summary = if dry_run {
        assembler.dry_run()
    } else {
        assembler.run()
    }
    .context("Failed to assemble setup file")?;

    tracing::info!(
        "Combined {} manifests, injected {} namespace lines",
        summary.manifests,
        summary.injected_lines
    );

    Ok(())
}
