use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use serde_derive::Serialize;

use geobox::util::{points_from_json, within_radius};
use geobox::{compute_square_boundary, great_circle_distance, parse_box, Coordinate,
             DistanceUnit};

#[derive(Parser)]
#[command(name = "geobox", version, about = "Bounding boxes and distances on the globe.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a box given by its top-left and bottom-right "lat,lng" corners.
    #[command(name = "box")]
    Corners {
        #[arg(allow_hyphen_values = true)]
        top_left: String,
        #[arg(allow_hyphen_values = true)]
        bottom_right: String,
    },
    /// Bounding box reaching DIST degrees of arc out from a center point.
    #[command(allow_negative_numbers = true)]
    Boundary {
        dist: f64,
        lat: f64,
        lng: f64,
        /// Print the box as a GeoJSON polygon.
        #[arg(long)]
        geojson: bool,
    },
    /// Great-circle distance between two points.
    #[command(allow_negative_numbers = true)]
    Distance {
        lat1: f64,
        lng1: f64,
        lat2: f64,
        lng2: f64,
        #[arg(long, value_enum, default_value_t = Unit::Km)]
        unit: Unit,
    },
    /// Points of a GeoJSON file within RADIUS of a center point, nearest first.
    #[command(allow_negative_numbers = true)]
    Nearby {
        file: PathBuf,
        lat: f64,
        lng: f64,
        radius: f64,
        #[arg(long, value_enum, default_value_t = Unit::Km)]
        unit: Unit,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Unit {
    Km,
    M,
}

impl From<Unit> for DistanceUnit {
    fn from(u: Unit) -> DistanceUnit {
        match u {
            Unit::Km => DistanceUnit::Kilometers,
            Unit::M => DistanceUnit::Meters,
        }
    }
}

#[derive(Serialize)]
struct Hit {
    index: usize,
    lat: f64,
    lng: f64,
    distance: f64,
}

fn run(cli: Cli) -> anyhow::Result<String> {
    let out = match cli.command {
        Command::Corners { top_left, bottom_right } => {
            let b = parse_box(&top_left, &bottom_right)
                .with_context(|| format!("parsing box [{}] [{}]", top_left, bottom_right))?;
            serde_json::to_string(&b)?
        }
        Command::Boundary { dist, lat, lng, geojson } => {
            let b = compute_square_boundary(dist, lat, lng);
            if geojson {
                serde_json::to_string(&b.to_geojson())?
            } else {
                serde_json::to_string(&b)?
            }
        }
        Command::Distance { lat1, lng1, lat2, lng2, unit } => {
            great_circle_distance(lat1, lng1, lat2, lng2, unit.into()).to_string()
        }
        Command::Nearby { file, lat, lng, radius, unit } => {
            let f = File::open(&file)
                .with_context(|| format!("opening {}", file.display()))?;
            let points = points_from_json(BufReader::new(f), None)
                .with_context(|| format!("reading points from {}", file.display()))?;
            let center = Coordinate::new(lat, lng);
            let hits: Vec<Hit> = within_radius(&points, center, radius, unit.into())
                .into_iter()
                .map(|(index, distance)| {
                    Hit {
                        index,
                        lat: points[index].lat,
                        lng: points[index].lng,
                        distance,
                    }
                })
                .collect();
            log::info!("{} of {} points within {}", hits.len(), points.len(), radius);
            serde_json::to_string(&hits)?
        }
    };
    Ok(out)
}

fn main() {
    env_logger::init();
    match run(Cli::parse()) {
        Ok(out) => println!("{}", out),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(1);
        }
    }
}
