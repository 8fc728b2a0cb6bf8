//! Room layout CLI: check, repair, and persist scene files

use clap::{Parser, Subcommand};
use room_layout::core::config::EngineConfig;
use room_layout::core::error::Result;
use room_layout::engine::{
    count_errors, count_warnings, detect_collisions, make_valid, resolve_collisions,
};
use room_layout::scene::loader;
use room_layout::scene::{Scene, Violation};
use std::path::{Path, PathBuf};

/// Validate and repair furniture layouts in rectangular rooms
#[derive(Parser, Debug)]
#[command(name = "room-layout")]
#[command(about = "Validate and repair furniture layouts in rectangular rooms")]
struct Args {
    /// TOML file overriding clearance and quality settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report violations without moving anything
    Check {
        /// Scene JSON file
        scene: PathBuf,
    },
    /// Run the sweep resolver and write the repositioned scene
    Resolve {
        /// Scene JSON file
        scene: PathBuf,
        /// Sweep iteration budget
        #[arg(short, long, default_value_t = 8)]
        iterations: usize,
        /// Output path; defaults to overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the full make-valid loop and write the repositioned scene
    Fix {
        /// Scene JSON file
        scene: PathBuf,
        /// Output path; defaults to overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the bundled demo scene to a file
    Demo {
        /// Output path for the scene JSON
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("room_layout=debug")
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => EngineConfig::default(),
    };

    match args.command {
        Command::Check { scene } => {
            let s = loader::load_scene(&scene)?;
            let violations = detect_collisions(&s.room, &s.objects, &config.clearances);
            report(&s, &violations);
        }
        Command::Resolve {
            scene,
            iterations,
            output,
        } => {
            let mut s = loader::load_scene(&scene)?;
            let res =
                resolve_collisions(&s.room, &s.objects, iterations, &config.clearances);
            s.objects = res.objects;
            report(&s, &res.remaining);
            let out = output.unwrap_or(scene);
            loader::save_scene(&out, &s)?;
            tracing::info!("wrote {}", out.display());
        }
        Command::Fix { scene, output } => {
            let mut s = loader::load_scene(&scene)?;
            let outcome = make_valid(&s.room, &s.objects, &config.clearances, &config.quality);
            if outcome.accepted(&config.quality) {
                tracing::info!(passes = outcome.passes_used, "layout meets the quality bar");
            } else {
                tracing::warn!(
                    passes = outcome.passes_used,
                    "pass budget exhausted, writing best effort"
                );
            }
            s.objects = outcome.objects;
            report(&s, &outcome.violations);
            let out = output.unwrap_or(scene);
            loader::save_scene(&out, &s)?;
            tracing::info!("wrote {}", out.display());
        }
        Command::Demo { output } => {
            loader::save_scene(&output, &loader::demo_scene())?;
            tracing::info!("wrote demo scene to {}", output.display());
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}

fn report(scene: &Scene, violations: &[Violation]) {
    let describe = |id: &str| -> String {
        scene
            .objects
            .iter()
            .find(|o| o.id == id)
            .and_then(|o| o.label.clone())
            .unwrap_or_else(|| id.to_string())
    };

    for v in violations {
        match &v.b {
            Some(b) => println!(
                "{}: {} ({} vs {})",
                v.severity,
                v.reason,
                describe(&v.a),
                describe(b)
            ),
            None => println!("{}: {} ({})", v.severity, v.reason, describe(&v.a)),
        }
    }
    println!(
        "{} errors, {} warnings",
        count_errors(violations),
        count_warnings(violations)
    );
}
