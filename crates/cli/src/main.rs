//! nearby CLI: load a corpus, then search it.
//!
//! ```text
//! nearby --data trucks.jsonl search --lat 37.78 --lon -122.41 -q tacos
//! nearby --data trucks.jsonl stats
//! nearby init-config
//! ```
//!
//! Results go to stdout as JSON; logs go to stderr (`RUST_LOG` filters them).
//! Exit status: 0 on success, 2 for invalid search parameters, 1 otherwise.

mod commands;

use anyhow::{bail, Context};
use clap::ArgMatches;
use nearby_engine::{
    load_corpus, Error, Ingested, NearbyConfig, SearchParams, CONFIG_FILE_NAME,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;

use commands::build_cli;

const EXIT_FAILURE: i32 = 1;
const EXIT_INVALID_PARAMS: i32 = 2;

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let matches = build_cli().get_matches();

    if let Err(e) = run(&matches) {
        process::exit(report(&e));
    }
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("init-config", sub)) => init_config(sub),
        Some(("stats", sub)) => {
            let loaded = load(sub)?;
            print_json(&StatsOutput {
                index: loaded.context.index_stats(),
                ingest: &loaded.report,
            })
        }
        Some(("search", sub)) => {
            let params = search_params(sub);
            let loaded = load(sub)?;
            let page = loaded.context.search(&params)?;
            print_json(&page)
        }
        _ => bail!("no command given"),
    }
}

/// Print the error and pick an exit status
fn report(err: &anyhow::Error) -> i32 {
    if let Some(validation) = err.downcast_ref::<Error>().and_then(Error::as_validation) {
        match serde_json::to_string_pretty(&validation.to_body()) {
            Ok(body) => println!("{}", body),
            Err(_) => eprintln!("{}", validation),
        }
        return EXIT_INVALID_PARAMS;
    }
    eprintln!("error: {:#}", err);
    EXIT_FAILURE
}

#[derive(Serialize)]
struct StatsOutput<'a> {
    index: nearby_engine::IndexStats,
    ingest: &'a nearby_engine::IngestReport,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("failed to encode output")?;
    println!("{}", out);
    Ok(())
}

fn search_params(sub: &ArgMatches) -> SearchParams {
    // lat and lon are required by the command tree
    let lat = sub.get_one::<f64>("lat").copied().unwrap_or(f64::NAN);
    let lon = sub.get_one::<f64>("lon").copied().unwrap_or(f64::NAN);

    let mut params = SearchParams::new(lat, lon);
    if let Some(radius) = sub.get_one::<f64>("radius") {
        params = params.with_radius(*radius);
    }
    if let Some(query) = sub.get_one::<String>("query") {
        params = params.with_query(query.as_str());
    }
    let page = sub.get_one::<i64>("page").copied().unwrap_or(params.page);
    let per_page = sub.get_one::<i64>("per-page").copied().unwrap_or(params.per_page);
    params.with_page(page, per_page)
}

/// Global flags are read from the subcommand's matches, where clap
/// propagates them regardless of position.
fn load(matches: &ArgMatches) -> anyhow::Result<Ingested> {
    let Some(data) = matches.get_one::<PathBuf>("data") else {
        bail!("--data is required for this command");
    };
    let config = resolve_config(matches.get_one::<PathBuf>("config"), data)?;
    let loaded = load_corpus(data, &config)
        .with_context(|| format!("failed to load corpus '{}'", data.display()))?;
    info!(
        indexed = loaded.report.indexed,
        skipped = loaded.report.skipped,
        "locations indexed"
    );
    Ok(loaded)
}

/// Explicit `--config`, else `nearby.toml` beside the corpus, else defaults
fn resolve_config(explicit: Option<&PathBuf>, data: &Path) -> anyhow::Result<NearbyConfig> {
    if let Some(path) = explicit {
        return Ok(NearbyConfig::from_file(path)?);
    }
    let beside = data
        .parent()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|p| p.exists());
    match beside {
        Some(path) => {
            info!(path = %path.display(), "using config");
            Ok(NearbyConfig::from_file(&path)?)
        }
        None => Ok(NearbyConfig::default()),
    }
}

fn init_config(sub: &ArgMatches) -> anyhow::Result<()> {
    if sub.get_flag("print") {
        print!("{}", NearbyConfig::default_toml());
        return Ok(());
    }
    let path = sub
        .get_one::<PathBuf>("path")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    if NearbyConfig::write_default_if_missing(&path)? {
        eprintln!("wrote {}", path.display());
    } else {
        eprintln!("{} already exists, left unchanged", path.display());
    }
    Ok(())
}
