use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use subway::{Dataset, ImportError, SubwayError, SubwayMap};

#[derive(Parser)]
#[command(name = "subway")]
#[command(about = "Subway line and shortest path explorer", long_about = None)]
struct Cli {
    /// Directory holding stations.csv, lines.csv and sections.csv
    #[arg(long, default_value = "data")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every line with its stations
    Lines,
    /// Show the stations of one line in order
    Stations {
        /// Line name, e.g. 신분당선
        line: String,
    },
    /// Find the shortest path between two stations
    Path {
        /// Origin station name
        from: String,
        /// Destination station name
        to: String,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error(transparent)]
    Subway(#[from] SubwayError),

    #[error("No station named {0:?}")]
    StationName(String),

    #[error("No line named {0:?}")]
    LineName(String),
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let map = load(&cli.data)?;

    let result = match cli.command {
        Commands::Lines => cmd_lines(&map),
        Commands::Stations { line } => cmd_stations(&map, &line),
        Commands::Path { from, to } => cmd_path(&map, &from, &to),
    };
    if let Err(err) = &result {
        warn!("Request rejected: {err}");
    }
    result
}

fn load(dir: &Path) -> Result<SubwayMap, CliError> {
    Ok(Dataset::from_dir(dir)?.into_subway_map()?)
}

fn cmd_lines(map: &SubwayMap) -> Result<(), CliError> {
    for line in map.lines() {
        let stations: Vec<String> = line
            .stations()
            .iter()
            .map(|station| station.name.to_owned())
            .collect();
        println!(
            "{} [{}] {} ({} total)",
            line.name,
            line.color,
            stations.join(" - "),
            line.total_distance()
        );
    }
    Ok(())
}

fn cmd_stations(map: &SubwayMap, line_name: &str) -> Result<(), CliError> {
    let line = map
        .line_by_name(line_name)
        .ok_or_else(|| CliError::LineName(line_name.to_owned()))?;

    for section in line.sections() {
        println!(
            "{} -> {} ({})",
            section.up_station, section.down_station, section.distance
        );
    }
    Ok(())
}

fn cmd_path(map: &SubwayMap, from: &str, to: &str) -> Result<(), CliError> {
    let station_id = |name: &str| {
        map.station_by_name(name)
            .map(|station| station.id)
            .ok_or_else(|| CliError::StationName(name.to_owned()))
    };

    let path = map.find_path(station_id(from)?, station_id(to)?)?;
    let stations: Vec<&str> = path
        .stations
        .iter()
        .map(|station| station.name.as_str())
        .collect();

    println!("{}", stations.join(" -> "));
    println!("Distance: {}", path.distance);
    Ok(())
}
