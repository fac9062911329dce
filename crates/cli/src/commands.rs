//! Clap command tree definition.

use clap::{value_parser, Arg, ArgAction, Command};

/// Build the complete CLI command tree.
pub fn build_cli() -> Command {
    Command::new("nearby")
        .about("Find nearby items matching a text query")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("PATH")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Config file (default: nearby.toml next to the corpus, if present)")
                .global(true),
        )
        .arg(
            Arg::new("data")
                .long("data")
                .short('d')
                .value_name("PATH")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("JSON-lines corpus file")
                .global(true),
        )
        .subcommand(build_search())
        .subcommand(build_stats())
        .subcommand(build_init_config())
}

// =========================================================================
// Search
// =========================================================================

fn build_search() -> Command {
    Command::new("search")
        .about("Search around a location, optionally filtered by text")
        .arg(
            Arg::new("lat")
                .long("lat")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Center latitude in degrees"),
        )
        .arg(
            Arg::new("lon")
                .long("lon")
                .required(true)
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Center longitude in degrees"),
        )
        .arg(
            Arg::new("radius")
                .long("radius")
                .short('r')
                .allow_negative_numbers(true)
                .value_parser(value_parser!(f64))
                .help("Radius in miles, 0 < radius <= 15 (default: 10)"),
        )
        .arg(
            Arg::new("query")
                .long("query")
                .short('q')
                .help("Free-text query"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("Page number, starting at 1 (default: 1)"),
        )
        .arg(
            Arg::new("per-page")
                .long("per-page")
                .allow_negative_numbers(true)
                .value_parser(value_parser!(i64))
                .help("Results per page, 1 to 50 (default: 10)"),
        )
}

// =========================================================================
// Stats / init-config
// =========================================================================

fn build_stats() -> Command {
    Command::new("stats").about("Load the corpus and print index sizes and skipped records")
}

fn build_init_config() -> Command {
    Command::new("init-config")
        .about("Write a default config file unless one exists")
        .arg(
            Arg::new("path")
                .value_name("PATH")
                .value_parser(value_parser!(std::path::PathBuf))
                .help("Where to write it (default: ./nearby.toml)"),
        )
        .arg(
            Arg::new("print")
                .long("print")
                .action(ArgAction::SetTrue)
                .help("Print the default config instead of writing it"),
        )
}
