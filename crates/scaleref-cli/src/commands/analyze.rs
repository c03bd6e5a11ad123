use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::bail;
use clap::Args;
use scaleref_analyzer::{Analyzer, ClusterAccessor, MemoryCluster, OwnerChain, OwnerLookup, report};
use scaleref_core::config::parse_timeout;
use scaleref_core::{DiagnosticResult, ScalerefConfig};
use scaleref_kube::KubeCluster;
use tracing::info;

const DEFAULT_CONFIG: &str = "scaleref.toml";

#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Only analyze autoscalers in this namespace.
    #[arg(short, long, conflicts_with = "all_namespaces")]
    pub namespace: Option<String>,
    /// Analyze every namespace, ignoring the configured one.
    #[arg(short = 'A', long)]
    pub all_namespaces: bool,
    /// Analyze a JSON cluster snapshot instead of the live cluster.
    #[arg(short, long)]
    pub snapshot: Option<PathBuf>,
    /// Output format: text or json.
    #[arg(short, long)]
    pub format: Option<String>,
    /// Config file (default: ./scaleref.toml when present).
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Per-request timeout for cluster lookups (e.g., "5s").
    #[arg(long)]
    pub timeout: Option<String>,
    /// Owner-reference hops to follow when resolving parents.
    #[arg(long)]
    pub max_owner_depth: Option<usize>,
}

/// Effective settings after merging config file and flags.
#[derive(Debug, PartialEq)]
pub struct Settings {
    pub namespace: Option<String>,
    pub format: String,
    pub lookup_timeout: Duration,
    pub max_owner_depth: usize,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<ScalerefConfig> {
    match path {
        Some(path) => ScalerefConfig::from_file(path),
        None if Path::new(DEFAULT_CONFIG).exists() => {
            ScalerefConfig::from_file(Path::new(DEFAULT_CONFIG))
        }
        None => Ok(ScalerefConfig::default()),
    }
}

pub fn settings(args: &AnalyzeArgs, config: &ScalerefConfig) -> anyhow::Result<Settings> {
    let namespace = if args.all_namespaces {
        None
    } else {
        args.namespace
            .clone()
            .or_else(|| config.analyzer.namespace.clone())
    };

    let lookup_timeout = match &args.timeout {
        Some(raw) => parse_timeout(raw)?,
        None => config.lookup_timeout()?,
    };

    let format = args
        .format
        .clone()
        .unwrap_or_else(|| config.output_format().to_string());
    if format != "text" && format != "json" {
        bail!("unsupported output format: {format} (expected text or json)");
    }

    Ok(Settings {
        namespace,
        format,
        lookup_timeout,
        max_owner_depth: args.max_owner_depth.unwrap_or(config.max_owner_depth()),
    })
}

pub fn render(results: &[DiagnosticResult], settings: &Settings) -> anyhow::Result<String> {
    match settings.format.as_str() {
        "json" => Ok(report::format_json(results)?),
        _ => Ok(report::format_report(results, settings.namespace.as_deref())),
    }
}

pub async fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    let settings = settings(&args, &config)?;

    let (accessor, owners) = match &args.snapshot {
        Some(path) => {
            info!(path = %path.display(), "analyzing snapshot");
            let cluster = Arc::new(MemoryCluster::from_file(path)?);
            let accessor: Arc<dyn ClusterAccessor> = cluster.clone();
            let owners: Arc<dyn OwnerLookup> = cluster;
            (accessor, owners)
        }
        None => {
            let cluster = Arc::new(KubeCluster::try_default(settings.lookup_timeout).await?);
            let accessor: Arc<dyn ClusterAccessor> = cluster.clone();
            let owners: Arc<dyn OwnerLookup> = cluster;
            (accessor, owners)
        }
    };

    let analyzer = Analyzer::new(
        accessor,
        Arc::new(OwnerChain::new(owners, settings.max_owner_depth)),
    )
    .with_namespace(settings.namespace.clone());

    let results = analyzer.analyze().await?;
    println!("{}", render(&results, &settings)?);
    Ok(())
}
