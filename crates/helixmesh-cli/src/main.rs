//! helixmesh CLI - build fiber meshes from the command line

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use helixmesh::export::{self, ExportFormat};
use helixmesh::{build_all, build_helix, FiberSet, HelixConfig, HelixReport};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "helixmesh")]
#[command(about = "Watertight meshes of helically wound square fibers", long_about = None)]
struct Cli {
    /// Show debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build every helix of a fiber set file
    Build {
        /// Fiber set TOML file
        input: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
        /// Output format: stl, ascii-stl or json
        #[arg(short, long, default_value_t = ExportFormat::Stl)]
        format: ExportFormat,
    },
    /// Print a report for every helix of a fiber set file
    Info {
        /// Fiber set TOML file
        input: PathBuf,
        /// Print the reports as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build one helix from command-line parameters
    Single {
        /// Former radius
        #[arg(long)]
        radius: f64,
        /// Cross-section side
        #[arg(long)]
        size: f64,
        /// Running angle in degrees
        #[arg(long, allow_hyphen_values = true)]
        angle_deg: f64,
        /// Axial length
        #[arg(long)]
        length: f64,
        /// Sweep steps
        #[arg(long)]
        steps: u32,
        /// End extrusion
        #[arg(long, default_value_t = 0.0)]
        extrusion: f64,
        /// Solid name
        #[arg(long, default_value = "helix")]
        name: String,
        /// Output file (.stl or .json)
        #[arg(short, long)]
        output: PathBuf,
        /// Output format, overriding the extension: stl, ascii-stl or json
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Build {
            input,
            output,
            format,
        } => build_file(&input, &output, format)?,
        Commands::Info { input, json } => show_info(&input, json)?,
        Commands::Single {
            radius,
            size,
            angle_deg,
            length,
            steps,
            extrusion,
            name,
            output,
            format,
        } => {
            let config = HelixConfig::new(name, radius, size, 0.0, length, steps)
                .with_running_angle_deg(angle_deg)
                .with_extrusion(extrusion);
            build_single(&config, &output, format)?;
        }
    }

    Ok(())
}

fn load_set(input: &Path) -> Result<FiberSet> {
    FiberSet::load(input).with_context(|| format!("failed to load fiber set {}", input.display()))
}

fn build_file(input: &Path, output: &Path, format: ExportFormat) -> Result<()> {
    let set = load_set(input)?;
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;

    let results = build_all(set.helices());
    for (config, result) in set.iter().zip(results) {
        let mesh = result.with_context(|| format!("failed to build helix '{}'", config.name))?;
        if !mesh.is_closed() {
            warn!(solid = %config.name, "mesh is not watertight");
        }
        let path = export::output_path(output, &config.name, format);
        export::write_mesh(&mesh, &config.name, format, &path)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    info!(helices = set.len(), dir = %output.display(), "build finished");
    println!("Built {} helices into {}", set.len(), output.display());
    Ok(())
}

fn build_single(config: &HelixConfig, output: &Path, format: Option<ExportFormat>) -> Result<()> {
    let format = ExportFormat::resolve(format, output)
        .with_context(|| format!("unknown output format for {}, pass --format", output.display()))?;
    let mesh = build_helix(config).with_context(|| format!("failed to build helix '{}'", config.name))?;
    export::write_mesh(&mesh, &config.name, format, output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    println!(
        "Exported {} triangles ({:.3} turns) to {}",
        mesh.len(),
        config.turns(),
        output.display()
    );
    Ok(())
}

fn show_info(input: &Path, json: bool) -> Result<()> {
    let set = load_set(input)?;
    let results = build_all(set.helices());

    let mut reports = Vec::with_capacity(set.len());
    for (config, result) in set.iter().zip(results) {
        let mesh = result.with_context(|| format!("failed to build helix '{}'", config.name))?;
        reports.push(HelixReport::new(config, &mesh));
    }

    if json {
        let text = export::reports_to_json(&reports).context("failed to serialize reports")?;
        println!("{text}");
        return Ok(());
    }

    println!("fiber set: {}", input.display());
    println!("  Helices: {}", set.len());
    for (config, report) in set.iter().zip(&reports) {
        println!("\n{}:", report.name);
        println!("  Radius: {}  Size: {}  Length: {}", config.radius, config.size, config.length);
        println!(
            "  Running angle: {:.3}°  Turns: {:.4}",
            config.running_angle.to_degrees(),
            report.turns
        );
        println!("  Steps: {}  Extrusion: {}", config.steps, config.extrusion);
        println!("  Triangles: {}", report.triangles);
        println!("  Closed: {}  Oriented: {}", report.closed, report.oriented);
        println!("  Volume: {:.6}  Area: {:.6}", report.volume, report.area);
        if let Some((lo, hi)) = report.bounds {
            println!(
                "  Bounds: ({:.3}, {:.3}, {:.3}) - ({:.3}, {:.3}, {:.3})",
                lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
            );
        }
    }

    Ok(())
}
