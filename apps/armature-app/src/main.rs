//! Armature headless CLI.
//!
//! Drives the IK session without a renderer:
//! - `solve`: pose a chain toward a target and print the resulting joints
//! - `info`: print workspace crate versions and solver defaults

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use armature_ik::{DescentConfig, SolveResult};
use armature_rig::{RigSession, SceneConfig};

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// 2D chain inverse kinematics toolkit.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pose a chain toward a target and print the result.
    Solve {
        /// Scene TOML file (joints, target, solver settings).
        #[arg(short, long)]
        scene: Option<PathBuf>,

        /// Joint position as "x,y", root first. Repeatable; overrides the
        /// scene file's joints when given.
        #[arg(short, long = "joint", value_name = "X,Y", value_parser = parse_point)]
        joints: Vec<[f32; 2]>,

        /// Target position as "x,y". Defaults to the end-effector.
        #[arg(short, long, value_name = "X,Y", value_parser = parse_point)]
        target: Option<[f32; 2]>,

        /// Override the solver iteration budget.
        #[arg(short, long)]
        max_iterations: Option<u32>,
    },

    /// Print crate and solver default information.
    Info,
}

fn parse_point(s: &str) -> Result<[f32; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got {s:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err("coordinates must be finite".into());
    }
    Ok([x, y])
}

// ---------------------------------------------------------------------------
// Mode implementations
// ---------------------------------------------------------------------------

fn run_solve(
    scene: Option<PathBuf>,
    joints: Vec<[f32; 2]>,
    target: Option<[f32; 2]>,
    max_iterations: Option<u32>,
) -> ExitCode {
    let mut config = match scene {
        Some(path) => match SceneConfig::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("failed to load scene {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => SceneConfig::default(),
    };

    if !joints.is_empty() {
        config.joints = joints;
    }
    if target.is_some() {
        config.target = target;
    }
    if let Some(budget) = max_iterations {
        config.solver.max_iterations = budget;
    }
    if let Err(err) = config.validate() {
        log::error!("invalid scene: {err}");
        return ExitCode::FAILURE;
    }

    let Some(target) = config.target() else {
        log::error!("nothing to solve: no joints and no target given");
        return ExitCode::FAILURE;
    };

    let mut session = RigSession::with_chain(config.chain(), config.solver.clone());
    session.enter_simulating(target);
    if let Err(err) = session.set_target(target) {
        log::error!("solve rejected: {err}");
        return ExitCode::FAILURE;
    }

    println!(
        "chain: {} joints, target [{:.2}, {:.2}]",
        session.chain().len(),
        target[0],
        target[1]
    );
    for (i, joint) in session.chain().joints().iter().enumerate() {
        let tag = if i == 0 { " (root)" } else { "" };
        println!("  joint {i}: [{:.3}, {:.3}]{tag}", joint[0], joint[1]);
    }

    match session.last_result() {
        Some(SolveResult {
            converged,
            iterations,
            distance,
            ..
        }) => {
            println!(
                "solved in {iterations} iterations, distance {distance:.4} ({})",
                if *converged { "converged" } else { "budget exhausted" }
            );
        }
        None => println!("degenerate chain: fewer than two joints, pose unchanged"),
    }

    ExitCode::SUCCESS
}

fn run_info() -> ExitCode {
    println!("armature {}", env!("CARGO_PKG_VERSION"));
    let defaults = DescentConfig::default();
    println!("solver defaults:");
    println!("  max_iterations: {}", defaults.max_iterations);
    println!("  sampling_step:  {} rad", defaults.sampling_step);
    println!("  learning_rate:  {}", defaults.learning_rate);
    println!("  tolerance:      {}", defaults.tolerance);
    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_target_level(log::LevelFilter::Off);
    log_config.set_location_level(log::LevelFilter::Off);

    if simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("failed to initialize logging");
    }

    match cli.command {
        Commands::Solve {
            scene,
            joints,
            target,
            max_iterations,
        } => run_solve(scene, joints, target, max_iterations),
        Commands::Info => run_info(),
    }
}
