use clap::Parser;
use college_atlas::export;
use college_atlas::geocode::{
    GeocodeResolver, LocationCache, NominatimProvider, ResolutionCoordinator,
};
use college_atlas::roster;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

/// college-atlas — plot where a roster went to school.
///
/// Reads a CSV of player,college pairs, resolves each distinct college
/// to coordinates (cache first, then OpenStreetMap Nominatim trying
/// "{name}", "{name} University", "University of {name}" in order),
/// and writes a college,latitude,longitude,players CSV for the map
/// renderer.
///
/// Examples:
///   college-atlas roster.csv
///   college-atlas roster.csv --out map.csv
///   college-atlas roster.csv --cache /tmp/atlas-cache.json --retries 2
#[derive(Parser)]
#[command(name = "college-atlas", version, about, long_about = None)]
struct Cli {
    /// Roster CSV produced by the scraping step (player,college rows).
    roster: PathBuf,

    /// Output CSV path. Defaults to stdout.
    #[arg(long, short = 'o')]
    out: Option<PathBuf>,

    /// Cache file path. Defaults to ~/.college-atlas/cache.json.
    #[arg(long)]
    cache: Option<PathBuf>,

    /// Extra attempts per name candidate after a provider network
    /// failure. An empty result is never retried.
    #[arg(long, default_value_t = 0)]
    retries: u32,
}

fn main() {
    let cli = Cli::parse();

    // A broken cache aborts before any output is produced.
    let cache = match &cli.cache {
        Some(path) => LocationCache::open(path.clone()),
        None => LocationCache::open_default(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let entries = roster::read_csv(&cli.roster).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    eprintln!(
        "  Read {} roster entries from {}",
        entries.len(),
        cli.roster.display()
    );

    let resolver = GeocodeResolver::new(NominatimProvider::new()).with_retries(cli.retries);
    let mut coordinator = ResolutionCoordinator::new(cache, resolver);

    let resolved = coordinator.resolve(&entries).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let stats = coordinator.stats();
    eprintln!(
        "  {} colleges resolved ({} from cache, {} geocoded), {} dropped, {} entries skipped",
        resolved.len(),
        stats.cache_hits,
        stats.geocoded,
        stats.dropped,
        stats.skipped_entries,
    );

    let result = match &cli.out {
        Some(path) => File::create(path)
            .and_then(|mut f| export::write_csv(&mut f, &resolved))
            .map(|_| eprintln!("  Wrote {}", path.display())),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            export::write_csv(&mut handle, &resolved).and_then(|_| handle.flush())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: cannot write output: {}", e);
        std::process::exit(1);
    }
}
