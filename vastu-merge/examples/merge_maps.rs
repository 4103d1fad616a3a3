//! Register two ROS maps and print the transform between them.
//!
//! Loads two map_server maps (YAML + PGM), extracts their occupied cells
//! and finds the rigid transform that carries map B into map A's frame.
//! The result is printed as a YAML transformation message.
//!
//! Usage:
//!   cargo run --example merge_maps -- maps/agent_a.yaml maps/agent_b.yaml
//!   cargo run --example merge_maps -- a.yaml b.yaml -c configs/merge.yaml --seed 42
//!   RUST_LOG=debug cargo run --example merge_maps -- a.yaml b.yaml

use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use vastu_merge::io::load_ros_map;
use vastu_merge::{MergeConfig, TransformationMessage, register_maps_with};

/// Find the transform between two occupancy grid maps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Reference map (YAML), stays fixed
    map_a: PathBuf,

    /// Map to align (YAML)
    map_b: PathBuf,

    /// Configuration file path
    #[arg(short, long, default_value = "configs/merge.yaml")]
    config: PathBuf,

    /// Seed for reproducible subsampling (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let config = if args.config.exists() {
        MergeConfig::load(&args.config)?
    } else {
        log::warn!(
            "Config {} not found, using defaults",
            args.config.display()
        );
        MergeConfig::default()
    };

    let grid_a = load_ros_map(&args.map_a)?;
    let grid_b = load_ros_map(&args.map_b)?;
    if (grid_a.resolution() - grid_b.resolution()).abs() > 1e-9 {
        log::warn!(
            "Map resolutions differ ({} vs {}); translation is in map A cells",
            grid_a.resolution(),
            grid_b.resolution()
        );
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let result = register_maps_with(&grid_a, &grid_b, &config, &mut rng)?;
    log::info!(
        "{} attempts, {} degenerate, {} ICP iterations",
        result.stats.attempts,
        result.stats.degenerate_attempts,
        result.stats.total_iterations
    );

    if let Some(transform) = result.transform() {
        let meters = transform.scaled(grid_a.resolution());
        log::info!(
            "Rotation {:.2}°, translation ({:.3}, {:.3}) m",
            meters.rotation_degrees(),
            meters.translation.x,
            meters.translation.y
        );
    }

    let message = TransformationMessage::from(&result);
    print!("{}", serde_yaml::to_string(&message)?);

    Ok(())
}
