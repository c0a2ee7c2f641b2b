use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use isovox_author::{EditorConfig, EditorSession};
use isovox_kernel::VoxelGrid;
use isovox_persist::MapFile;
use isovox_render::{DebugTextRenderer, IsoPainter, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "isovox-cli", about = "CLI tool for isovox voxel maps")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Editor config file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Viewport width in pixels
    #[arg(long, global = true)]
    width: Option<f64>,

    /// Viewport height in pixels
    #[arg(long, global = true)]
    height: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print map name, size and per-level occupancy
    Info {
        /// Map file
        map: PathBuf,
    },
    /// Render the map from the initial camera
    Render {
        /// Map file
        map: PathBuf,
        /// Emit the painter's draw list as JSON instead of a text dump
        #[arg(long)]
        json: bool,
    },
    /// Replay an input script against the map and report the final state
    Play {
        /// Map file
        map: PathBuf,
        /// Input script, one action per line
        script: PathBuf,
        /// Save the edited map here
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Info { map } => {
            let (name, grid) = open_map(&map)?;
            print_info(&name, &grid);
        }
        Commands::Render { map, json } => {
            let (_, grid) = open_map(&map)?;
            let session = EditorSession::new(grid, config)?;
            let scene = session.render_scene();
            if json {
                let commands = IsoPainter::new().render(&scene);
                println!("{}", serde_json::to_string_pretty(&commands)?);
            } else {
                print!("{}", DebugTextRenderer::new().render(&scene));
            }
        }
        Commands::Play { map, script, out } => {
            let (name, grid) = open_map(&map)?;
            let text = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let actions = isovox_input::parse_script(&text)
                .with_context(|| format!("parsing script {}", script.display()))?;

            tracing::info!(actions = actions.len(), "replaying input script");
            let mut session = EditorSession::new(grid, config)?;
            let before = session.grid().voxel_count();
            for action in actions.iter().cloned() {
                session.handle(action);
            }
            println!(
                "Replayed {} actions: {} -> {} voxels",
                actions.len(),
                before,
                session.grid().voxel_count()
            );
            print!("{}", DebugTextRenderer::new().render(&session.render_scene()));

            if let Some(out) = out {
                MapFile::capture(name, session.grid())
                    .save(&out)
                    .with_context(|| format!("saving map {}", out.display()))?;
                println!("Saved {}", out.display());
            }
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<EditorConfig> {
    let mut config = match &cli.config {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    if let Some(width) = cli.width {
        config.viewport_width = width;
    }
    if let Some(height) = cli.height {
        config.viewport_height = height;
    }
    config.validate().context("invalid editor config")?;
    Ok(config)
}

fn open_map(path: &Path) -> anyhow::Result<(String, VoxelGrid)> {
    let file =
        MapFile::load(path).with_context(|| format!("reading map {}", path.display()))?;
    let name = file.name.clone();
    let grid = file
        .into_grid()
        .with_context(|| format!("validating map {}", path.display()))?;
    Ok((name, grid))
}

fn print_info(name: &str, grid: &VoxelGrid) {
    let size = grid.size();
    println!("isovox-cli v{}", env!("CARGO_PKG_VERSION"));
    println!("map: {name}");
    println!("size: {}x{}x{} ({} cells)", size.x, size.y, size.z, grid.volume());
    println!("voxels: {}", grid.voxel_count());
    let mut per_level = vec![0usize; size.z as usize];
    for voxel in grid.voxels() {
        per_level[voxel.position.z as usize] += 1;
    }
    for (z, count) in per_level.iter().enumerate() {
        println!("  level {z}: {count}");
    }
}
