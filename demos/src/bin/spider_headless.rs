//! Headless spider chasing a fixed target over flat ground.
//!
//! Prints a progress line once per simulated second and a step count per
//! leg at the end. Set `RUST_LOG=skitter_gait=debug` to see every step.
//!
//! Usage:
//!   cargo run -p skitter-demos --bin spider_headless
//!   cargo run -p skitter-demos --bin spider_headless -- --target 4,0,-10 --ticks 900
//!   cargo run -p skitter-demos --bin spider_headless -- --config demos/config/spider.toml

use std::path::PathBuf;
use std::process::ExitCode;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::Parser;
use skitter_core::config::CreatureConfig;
use skitter_core::types::LegId;
use skitter_demos::SpiderScene;
use skitter_gait::ground::FlatGround;

#[derive(Parser)]
#[command(about = "Headless spider locomotion demo")]
struct Args {
    /// Creature config (TOML). Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to simulate
    #[arg(long, default_value_t = 600)]
    ticks: u32,

    /// Frame time (s)
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f64,

    /// Steering target as x,y,z
    #[arg(long, default_value = "0,0,-10", value_parser = parse_vec3)]
    target: Vec3,

    /// Ground height (m)
    #[arg(long, default_value_t = 0.0)]
    ground: f64,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("'{p}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got '{s}'")),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match CreatureConfig::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => CreatureConfig::default(),
    };
    if !(args.dt.is_finite() && args.dt > 0.0) {
        eprintln!("--dt must be a positive number, got {}", args.dt);
        return ExitCode::FAILURE;
    }

    println!("=== Skitter Headless ===");
    println!("  Target: {}", args.target);
    println!("  Frames: {} at dt={:.4}s", args.ticks, args.dt);
    println!(
        "  Step: trigger {:.2} m, {:.2} s, overshoot {:.0}%",
        config.step.trigger_distance,
        config.step.move_duration,
        config.step.overshoot_fraction * 100.0
    );
    println!();

    let mut scene = match SpiderScene::new(
        &config,
        FlatGround::new(args.ground),
        args.target,
        LogPlugin::default(),
    ) {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("Failed to build the spider: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Frames per progress line
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let per_second = (1.0 / args.dt).round().max(1.0) as u32;

    for frame in 1..=args.ticks {
        scene.tick(args.dt);
        if frame % per_second != 0 {
            continue;
        }
        let Some(snap) = scene.snapshot() else {
            eprintln!("Spider body disappeared at frame {frame}");
            return ExitCode::FAILURE;
        };
        let moving: Vec<_> = snap.moving.iter().map(|id| id.short_name()).collect();
        println!(
            "t={:5.2}s  pos=({:6.2}, {:5.2}, {:6.2})  yaw={:6.1}°  active={:?}  moving=[{}]",
            snap.elapsed,
            snap.position.x,
            snap.position.y,
            snap.position.z,
            snap.yaw.to_degrees(),
            snap.active,
            moving.join(" "),
        );
    }

    // Summary
    let steps = scene.steps_per_leg();
    println!();
    println!("Steps per leg:");
    for id in LegId::ALL {
        println!("  {id}: {}", steps[id.index()]);
    }
    if let Some(snap) = scene.snapshot() {
        let remaining = args.target.distance(snap.position);
        println!("Distance to target: {remaining:.2} m");
    }

    ExitCode::SUCCESS
}
