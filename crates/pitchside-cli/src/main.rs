use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pitchside_cli::output::{render_distance, render_nearby, DistanceReport, OutputFormat};
use pitchside_lib::{
    load_dataset_near, resolve_dataset_path, resolve_reference, Coordinate, Entity, EntityKind,
    NearbySummary, ProximityQuery, DEFAULT_RADIUS_KM,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Find players, pickup games and sports fields near you")]
struct Cli {
    /// Path to a catalog export (.json) or snapshot (.db). Defaults to
    /// $PITCHSIDE_DATASET, then the platform data directory.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List players near a location.
    Players(NearbyArgs),
    /// List pickup games near a location.
    Games(NearbyArgs),
    /// List sports fields and courts near a location.
    #[command(alias = "courts")]
    Fields(NearbyArgs),
    /// Great-circle distance between two coordinates.
    Distance {
        /// Start point as LAT,LON.
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        from: Coordinate,
        /// End point as LAT,LON.
        #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
        to: Coordinate,
    },
}

#[derive(Args, Debug)]
struct NearbyArgs {
    /// Reference location as LAT,LON. Defaults to $PITCHSIDE_LOCATION; without
    /// either, nothing is filtered.
    #[arg(long, value_parser = parse_coordinate, allow_hyphen_values = true)]
    near: Option<Coordinate>,

    /// Search radius in kilometres.
    #[arg(long, value_parser = parse_radius, default_value_t = DEFAULT_RADIUS_KM)]
    radius: f64,

    /// Show at most this many results, nearest first.
    #[arg(long)]
    limit: Option<usize>,
}

impl NearbyArgs {
    fn query(&self) -> ProximityQuery {
        let query = ProximityQuery::within(self.radius);
        match self.limit {
            Some(limit) => query.with_limit(limit),
            None => query,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let data = cli.data.as_deref();

    match &cli.command {
        Command::Players(args) => handle_nearby(EntityKind::Player, args, data, cli.format),
        Command::Games(args) => handle_nearby(EntityKind::Game, args, data, cli.format),
        Command::Fields(args) => handle_nearby(EntityKind::Field, args, data, cli.format),
        Command::Distance { from, to } => {
            render_distance(&DistanceReport::new(*from, *to), cli.format)
                .context("failed to write distance")
        }
    }
}

fn handle_nearby(
    kind: EntityKind,
    args: &NearbyArgs,
    data: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let reference = resolve_reference(args.near);
    debug!(?reference, %kind, radius_km = args.radius, "running nearby query");

    let dataset_path =
        resolve_dataset_path(data).context("failed to locate the Pitchside dataset")?;
    let catalog = load_dataset_near(&dataset_path, reference, args.radius)
        .with_context(|| format!("failed to load dataset from {}", dataset_path.display()))?;

    let query = args.query();
    match kind {
        EntityKind::Player => emit(reference, &query, catalog.players.iter(), format),
        EntityKind::Game => emit(reference, &query, catalog.games.iter(), format),
        EntityKind::Field => emit(reference, &query, catalog.fields.iter(), format),
    }
}

fn emit<T, I>(
    reference: Option<Coordinate>,
    query: &ProximityQuery,
    entities: I,
    format: OutputFormat,
) -> Result<()>
where
    T: Entity + Serialize,
    I: IntoIterator<Item = T>,
{
    let summary = NearbySummary::build(reference, query, entities);
    render_nearby(&summary, format).context("failed to write results")
}

fn parse_coordinate(value: &str) -> std::result::Result<Coordinate, String> {
    value.parse::<Coordinate>().map_err(|err| err.to_string())
}

fn parse_radius(value: &str) -> std::result::Result<f64, String> {
    let radius: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err("radius must be a positive number of kilometres".to_string())
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
