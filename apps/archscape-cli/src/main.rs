mod config;
mod simulate;

use std::path::PathBuf;

use anyhow::Context;
use archscape_mesh::{ArchBuilder, GridTerrainBuilder, Mesh};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::config::SceneConfig;

#[derive(Parser)]
#[command(name = "archscape-cli", about = "Build archscape meshes and run the animated scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config file (JSON or YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build the grid terrain and print its summary
    Terrain {
        #[arg(long)]
        width_segments: Option<u32>,
        #[arg(long)]
        length_segments: Option<u32>,
        #[arg(long)]
        world_width: Option<f32>,
        #[arg(long)]
        world_length: Option<f32>,
        /// Number of leading vertices to print
        #[arg(long, default_value = "4")]
        show: usize,
    },
    /// Build the arch and print its summary
    Arch {
        #[arg(long)]
        segments: Option<u32>,
        #[arg(long)]
        inner_radius: Option<f32>,
        #[arg(long)]
        thickness: Option<f32>,
        #[arg(long)]
        height: Option<f32>,
        /// Number of leading vertices to print
        #[arg(long, default_value = "4")]
        show: usize,
    },
    /// Run the animated scene headless for a number of frames
    Simulate {
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("archscape-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", archscape_common::crate_info());
            println!("mesh: {}", archscape_mesh::crate_info());
            println!("scene: {}", archscape_scene::crate_info());
            println!("animate: {}", archscape_animate::crate_info());
            println!("input: {}", archscape_input::crate_info());
        }
        Commands::Terrain {
            width_segments,
            length_segments,
            world_width,
            world_length,
            show,
        } => {
            let mut params = config.terrain;
            if let Some(v) = width_segments {
                params.width_segments = v;
            }
            if let Some(v) = length_segments {
                params.length_segments = v;
            }
            if let Some(v) = world_width {
                params.world_width = v;
            }
            if let Some(v) = world_length {
                params.world_length = v;
            }
            let mesh = GridTerrainBuilder::new(params)
                .build()
                .context("building terrain")?;
            print_mesh(&mesh, show);
        }
        Commands::Arch {
            segments,
            inner_radius,
            thickness,
            height,
            show,
        } => {
            let mut params = config.arch;
            if let Some(v) = segments {
                params.segments = v;
            }
            if let Some(v) = inner_radius {
                params.inner_radius = v;
            }
            if let Some(v) = thickness {
                params.thickness = v;
            }
            if let Some(v) = height {
                params.height = v;
            }
            let mesh = ArchBuilder::new(params).build().context("building arch")?;
            print_mesh(&mesh, show);
        }
        Commands::Simulate { frames, dt } => {
            let report = simulate::run(&config, frames, dt)?;
            println!("Simulated {frames} frames at dt={dt}");
            println!("{}", report.summary);
            println!(
                "Arch: scale={:.3}, phase={:?}, phase changes={}",
                report.arch_scale, report.arch_phase, report.phase_changes
            );
            println!(
                "Light: position=({:.2}, {:.2}, {:.2})",
                report.light_position.x, report.light_position.y, report.light_position.z
            );
            println!(
                "Camera: mode={:?}, position=({:.2}, {:.2}, {:.2})",
                report.camera_mode,
                report.camera_position.x,
                report.camera_position.y,
                report.camera_position.z
            );
            for d in &report.diagnostics {
                println!("  warning [{}]: {}", d.source, d.message);
            }
        }
    }

    Ok(())
}

fn print_mesh(mesh: &Mesh, show: usize) {
    println!(
        "{}: vertices={}, triangles={}, revision={}",
        mesh.name(),
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.revision()
    );
    if let Some((min, max)) = mesh.bounds() {
        println!(
            "bounds: ({:.3}, {:.3}, {:.3}) .. ({:.3}, {:.3}, {:.3})",
            min.x, min.y, min.z, max.x, max.y, max.z
        );
    }
    for (i, ((v, n), uv)) in mesh
        .vertices()
        .iter()
        .zip(mesh.normals())
        .zip(mesh.uvs())
        .take(show)
        .enumerate()
    {
        println!(
            "  [{i}] pos=({:.3}, {:.3}, {:.3}) normal=({:.3}, {:.3}, {:.3}) uv=({:.3}, {:.3})",
            v.x, v.y, v.z, n.x, n.y, n.z, uv.x, uv.y
        );
    }
}
