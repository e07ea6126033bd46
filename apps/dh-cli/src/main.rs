use clap::{Parser, Subcommand, ValueEnum};
use dh_app::{AppResult, NetworkReport, build_network, load_config, lookup_building, lookup_pipe};
use dh_geo::DistanceModel;
use dh_graph::NetworkConfig;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "dh-cli")]
#[command(about = "District heating network reconstruction from design features", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct Settings {
    /// Network configuration file (YAML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Override the near-distance tolerance
    #[arg(long, global = true)]
    tolerance: Option<f64>,
    /// Override the distance model
    #[arg(long, global = true, value_enum)]
    distance_model: Option<ModelArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    Geodesic,
    Haversine,
    Euclidean,
}

impl From<ModelArg> for DistanceModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Geodesic => DistanceModel::Geodesic,
            ModelArg::Haversine => DistanceModel::Haversine,
            ModelArg::Euclidean => DistanceModel::Euclidean,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the network and print entity counts
    Check {
        /// Path to the feature snapshot (JSON or YAML)
        snapshot: PathBuf,
    },
    /// Print counts, forks and data-quality diagnostics
    Report {
        /// Path to the feature snapshot (JSON or YAML)
        snapshot: PathBuf,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Look up a pipe or building by its source identifier
    Lookup {
        /// Path to the feature snapshot (JSON or YAML)
        snapshot: PathBuf,
        #[arg(long, conflicts_with = "building", required_unless_present = "building")]
        pipe: Option<String>,
        #[arg(long)]
        building: Option<String>,
    },
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&cli.settings)?;

    match cli.command {
        Commands::Check { snapshot } => cmd_check(&snapshot, &config),
        Commands::Report { snapshot, format } => cmd_report(&snapshot, &config, format),
        Commands::Lookup {
            snapshot,
            pipe,
            building,
        } => cmd_lookup(&snapshot, &config, pipe.as_deref(), building.as_deref()),
    }
}

fn resolve_config(settings: &Settings) -> AppResult<NetworkConfig> {
    let mut config = match &settings.config {
        Some(path) => load_config(path)?,
        None => NetworkConfig::default(),
    };
    if let Some(tolerance) = settings.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(model) = settings.distance_model {
        config.distance_model = model.into();
    }
    dh_app::validate_config(&config)?;
    Ok(config)
}

fn cmd_check(snapshot: &Path, config: &NetworkConfig) -> AppResult<()> {
    let network = build_network(snapshot, config)?;
    let counts = NetworkReport::from_network(&network).counts;
    println!("✓ Network built from {}", snapshot.display());
    println!(
        "  Pipes: {} ({} connectors, {} links)",
        counts.pipes, counts.connectors, counts.links
    );
    println!("  Buildings: {}", counts.buildings);
    println!("  Nodes: {} ({} forks)", counts.nodes, counts.forks);
    println!("  Build time: {:.3}s", network.timings().total_s());
    Ok(())
}

fn cmd_report(snapshot: &Path, config: &NetworkConfig, format: Format) -> AppResult<()> {
    let network = build_network(snapshot, config)?;
    let report = NetworkReport::from_network(&network);
    match format {
        Format::Json => println!("{}", to_json(&report)?),
        Format::Text => print!("{}", report.to_text()),
    }
    Ok(())
}

fn cmd_lookup(
    snapshot: &Path,
    config: &NetworkConfig,
    pipe: Option<&str>,
    building: Option<&str>,
) -> AppResult<()> {
    let network = build_network(snapshot, config)?;
    let json = match (pipe, building) {
        (Some(id), _) => to_json(&lookup_pipe(&network, id)?)?,
        (None, Some(id)) => to_json(&lookup_building(&network, id)?)?,
        (None, None) => return Ok(()),
    };
    println!("{json}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| dh_app::AppError::Serialize(e.to_string()))
}
