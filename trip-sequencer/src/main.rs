use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use trip_sequencer::agency::AgencyProfile;
use trip_sequencer::domain::ConfigurationGap;
use trip_sequencer::feed::{ConversionError, FeedDocument, ResolutionReport, convert_feed};
use trip_sequencer::resolve::{MatchConfig, resolve_feed};
use trip_sequencer::store::{SequenceStore, StoreDocument, StoreLoadError};

/// Split and order Cranbrook Transit trips using canonical stop sequences.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON feed snapshot with `routes` and `trips`.
    feed: Option<PathBuf>,

    /// Load canonical sequences from this JSON file instead of the built-in tables.
    #[arg(long)]
    store: Option<PathBuf>,

    /// Mandatory stops a direction must match to claim a trip.
    #[arg(long, default_value_t = MatchConfig::default().min_mandatory_matches)]
    min_mandatory_matches: usize,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Print the canonical sequence store as JSON and exit.
    #[arg(long)]
    dump_store: bool,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid feed snapshot: {0}")]
    Feed(#[source] serde_json::Error),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Store(#[from] StoreLoadError),

    #[error(transparent)]
    Config(#[from] ConfigurationGap),

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),

    #[error("failed to encode output: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("a feed snapshot is required unless --dump-store is given")]
    MissingFeed,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_json(value: &impl serde::Serialize, pretty: bool) -> Result<(), CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(CliError::Encode)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let profile = AgencyProfile::cranbrook()?;
    let store = match &args.store {
        Some(path) => SequenceStore::load_json(path)?,
        None => profile.sequence_store()?,
    };
    info!(agency = profile.name(), routes = store.len(), "loaded canonical sequences");

    if args.dump_store {
        return write_json(&StoreDocument::from_store(&store), args.pretty);
    }

    let path = args.feed.ok_or(CliError::MissingFeed)?;
    let json = fs::read_to_string(&path).map_err(|source| CliError::Read {
        path: path.clone(),
        source,
    })?;
    let doc = FeedDocument::from_json(&json).map_err(CliError::Feed)?;
    let (routes, trips) = convert_feed(&doc)?;
    info!(routes = routes.len(), trips = trips.len(), "loaded feed snapshot");

    let config = MatchConfig::new(args.min_mandatory_matches);
    let resolution = resolve_feed(&profile, &store, &config, &routes, &trips)?;

    write_json(&ResolutionReport::new(&profile, &resolution), args.pretty)
}

fn main() -> ExitCode {
    init_logging();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
