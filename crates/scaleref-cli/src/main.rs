use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "scaleref",
    about = "Validate HorizontalPodAutoscaler scale-target references",
    version,
    propagate_version = true,
)]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check every autoscaler's scale target and report the broken ones.
    ///
    /// Settings are read from scaleref.toml (or --config) and overridden by
    /// flags. With --snapshot, a JSON snapshot is analyzed instead of the
    /// live cluster.
    Analyze(commands::analyze::AnalyzeArgs),
    /// Write a scaleref.toml with every setting spelled out.
    InitConfig {
        /// Where to write the config file.
        #[arg(short, long, default_value = "scaleref.toml")]
        path: PathBuf,
        /// Namespace to pin in the generated config.
        #[arg(short, long)]
        namespace: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json)?;

    match cli.command {
        Commands::Analyze(args) => commands::analyze::run(args).await,
        Commands::InitConfig { path, namespace } => {
            commands::init::run(&path, namespace.as_deref())
        }
    }
}

fn init_tracing(json: bool) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn,scaleref=info"))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
