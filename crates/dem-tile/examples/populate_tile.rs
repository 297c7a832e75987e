//! Example: populate a synthetic tile and query it.
//!
//! Usage: cargo run --example populate_tile -- <lat> <lon> [rows] [columns]
//!
//! The tile covers 47°N..48°N, 123°W..122°W with a cone-shaped hill in the
//! middle. Set `RUST_LOG=debug` to see the tile lifecycle.

use dem_tile::{SimpleTile, Tile, TileGeometry};
use std::env;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <lat> <lon> [rows] [columns]", args[0]);
        eprintln!("Example: {} 47.5 -122.5 1201 1201", args[0]);
        std::process::exit(1);
    }

    let lat: f64 = args[1].parse().expect("Invalid latitude");
    let lon: f64 = args[2].parse().expect("Invalid longitude");
    let rows: usize = args.get(3).map_or(Ok(1201), |s| s.parse()).expect("Invalid rows");
    let columns: usize = args.get(4).map_or(Ok(1201), |s| s.parse()).expect("Invalid columns");

    let geometry = TileGeometry::new(
        47.0,
        -123.0,
        1.0 / rows as f64,
        1.0 / columns as f64,
        rows,
        columns,
    );

    println!("Populating {} x {} tile...", rows, columns);
    let start = Instant::now();

    let mut tile = match SimpleTile::with_geometry(geometry) {
        Ok(tile) => tile,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let center_lat = 47.5;
    let center_lon = -122.5;
    for i in 0..rows as i64 {
        for j in 0..columns as i64 {
            let dlat = tile.latitude_at_index(i) - center_lat;
            let dlon = tile.longitude_at_index(j) - center_lon;
            let distance = (dlat * dlat + dlon * dlon).sqrt();
            let elevation = (1500.0 - 3000.0 * distance).max(0.0);
            tile.set_elevation(i, j, elevation)
                .expect("Grid indices are in range");
        }
    }
    tile.tile_update_completed().expect("Failed to finalize tile");

    println!("Populated in {:.3}s", start.elapsed().as_secs_f64());

    let footprint = tile.footprint();
    println!(
        "Footprint: lat {:.2}° to {:.2}°, lon {:.2}° to {:.2}°",
        footprint.min_lat, footprint.max_lat, footprint.min_lon, footprint.max_lon
    );
    if let Some((min, max)) = tile.elevation_range() {
        println!("Elevation range: {:.2} to {:.2} meters", min, max);
    }

    println!("\nQuerying ({}, {})...", lat, lon);
    if !tile.covers(lat, lon) {
        eprintln!("Point is outside the tile footprint");
        std::process::exit(1);
    }

    let (Some(i), Some(j)) = (tile.floor_latitude_index(lat), tile.floor_longitude_index(lon))
    else {
        eprintln!("Invalid coordinate");
        std::process::exit(1);
    };

    match tile.elevation_at_indices(i, j) {
        Ok(elevation) => println!("Elevation at cell ({}, {}): {:.2} meters", i, j, elevation),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
