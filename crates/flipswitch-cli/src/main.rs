//! flipswitch CLI - check switch manifests and replay gesture scripts.

mod script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use flipswitch_core::{SwitchOutput, ToggleDragEngine};
use flipswitch_yaml::SwitchManifest;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};

#[derive(Parser)]
#[command(name = "flipswitch")]
#[command(about = "Draggable switch manifests and gesture replay")]
#[command(version)]
struct Cli {
    /// Log engine decisions at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check YAML manifest validity
    Check {
        /// Path to manifest file
        #[arg(default_value = "switches.yaml")]
        manifest: PathBuf,
    },

    /// Replay a gesture script against one switch
    Replay {
        /// Path to manifest file
        manifest: PathBuf,

        /// Id of the switch to drive
        #[arg(short, long)]
        switch: String,

        /// Script file, one command per line
        script: PathBuf,

        /// Print outputs as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check { manifest } => check_manifest(&manifest),
        Commands::Replay {
            manifest,
            switch,
            script,
            json,
        } => replay(&manifest, &switch, &script, json),
    }
}

fn load_manifest(path: &Path) -> Result<SwitchManifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read manifest {}", path.display()))?;
    SwitchManifest::from_yaml(&content)
        .with_context(|| format!("manifest {} is invalid", path.display()))
}

fn check_manifest(path: &Path) -> Result<()> {
    println!("Checking manifest: {}", path.display());
    let manifest = load_manifest(path)?;

    println!("Manifest valid!");
    println!("  Switches: {}", manifest.switches.len());
    for entry in &manifest.switches {
        let config = entry.drag_config();
        println!(
            "  - {} ({}) {}x{} track {} gain {} settle {}s",
            entry.id,
            if entry.on { "on" } else { "off" },
            entry.width,
            entry.height,
            config.track_length,
            config.drag_velocity_gain,
            config.animation_duration,
        );
    }
    Ok(())
}

fn replay(manifest: &Path, id: &str, script_path: &Path, json: bool) -> Result<()> {
    let manifest = load_manifest(manifest)?;
    let entry = manifest
        .get(id)
        .with_context(|| format!("no switch with id `{id}`"))?;
    let source = fs::read_to_string(script_path)
        .with_context(|| format!("failed to read script {}", script_path.display()))?;
    let steps = script::parse(&source)
        .with_context(|| format!("script {} is invalid", script_path.display()))?;

    let mut engine = ToggleDragEngine::new(entry.drag_config());
    debug!(switch = id, steps = steps.len(), "replaying script");

    let mut outputs = Vec::new();
    for step in steps {
        outputs.clear();
        step.command.apply(&mut engine, &mut outputs);
        for output in &outputs {
            if json {
                let line = serde_json::to_string(output).context("failed to encode output")?;
                println!("{line}");
            } else {
                println!("{:>4}: {}", step.line, describe(output));
            }
        }
    }

    if !json {
        println!(
            "final: {} at offset {}",
            if engine.is_on() { "on" } else { "off" },
            engine.offset()
        );
    }
    Ok(())
}

fn describe(output: &SwitchOutput) -> String {
    match output {
        SwitchOutput::PositionChanged { offset } => format!("position {offset}"),
        SwitchOutput::LiveStateChanged { on } => format!("live {}", state(*on)),
        SwitchOutput::StateCommitted { on } => format!("committed {}", state(*on)),
        SwitchOutput::TransitionRequested(t) => format!(
            "settle {} -> {}{}",
            t.from,
            t.to,
            if t.animated {
                format!(" over {}s", t.duration)
            } else {
                String::new()
            }
        ),
    }
}

const fn state(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}
