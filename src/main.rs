//! track-mesh-scale: rescale the regions of a single-track reference mesh.
//!
//! Reads a reference mesh, rescales each controlling region to the requested target
//! dimension and writes the new nodal coordinates to `nodalCoordsScaled.dat`.
//!
//! # Logging
//!
//! Set the `RUST_LOG` environment variable (or pass `-v`, `-vv`) to control log output:
//! - `RUST_LOG=track_mesh_scale=info` - region ordering and file summaries
//! - `RUST_LOG=track_mesh_scale=debug` - normalization and per-axis details
//!
//! # Example
//!
//! ```bash
//! track-mesh-scale reference.inp 3 2 15 2 3  1 1 1.2 1 1  1 0.75 0.6 -o ./scaled
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use track_mesh_scale::scaling::dimension_usage;
use track_mesh_scale::{
    resolve_all, scale_mesh, write_scaled_coordinates, Mesh, ScaleFactors, TargetDimensions,
};

/// Rescale the deposit and base plate regions of a single-track FE mesh without remeshing.
#[derive(Parser)]
#[command(name = "track-mesh-scale")]
#[command(author, version, about, long_about = None)]
#[command(after_help = dimension_usage())]
struct Cli {
    /// Reference mesh file (Abaqus .inp or .json)
    mesh: PathBuf,

    /// Target dimensions of the 13 controlling regions (see below)
    #[arg(required = true, allow_negative_numbers = true)]
    dimensions: Vec<f64>,

    /// Directory for nodalCoordsScaled.dat
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write the scaled mesh (nodes and node sets) as JSON
    #[cfg(feature = "json_export")]
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print the resolved regions and resulting dimensions without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Suppress all non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Initialize the tracing subscriber based on verbosity level.
fn init_tracing(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    // RUST_LOG takes precedence over -v flags
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "warn",
            1 => "track_mesh_scale=info",
            2 => "track_mesh_scale=debug",
            _ => "trace",
        };
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .with(filter)
        .init();
}

fn print_summary(mesh: &Mesh, factors: &ScaleFactors) -> Result<()> {
    for (axis, regions) in resolve_all(mesh, factors)? {
        println!("{} (ordered by increasing coordinate):", axis);

        let mut total = 0.0;
        for region in regions.iter() {
            let [min, max] = region.bounds.unwrap_or([f64::NAN; 2]);
            println!(
                "  {:<40} [{:>10.4}, {:>10.4}]  x {:<8.4} {:>10.4} -> {:>10.4}",
                region.role.set_name(),
                min,
                max,
                region.scale,
                region.length(),
                region.scaled_length()
            );
            total += region.scaled_length();
        }

        println!("  {:<40} {:>55.4}", "total", total);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let factors = TargetDimensions::from_slice(&cli.dimensions)?.scale_factors();

    let mut mesh = Mesh::from_file(&cli.mesh)
        .with_context(|| format!("Failed to load mesh from {:?}", cli.mesh))?;
    mesh.translate_to_origin();

    if cli.dry_run {
        return print_summary(&mesh, &factors);
    }

    let scaled = scale_mesh(&mesh, &factors)
        .with_context(|| format!("Failed to scale mesh {:?}", cli.mesh))?;

    // a failed run leaves neither file behind
    #[cfg(feature = "json_export")]
    if let Some(json_path) = &cli.json {
        mesh.with_coordinates(&scaled.coords)
            .export_to_json(json_path)
            .with_context(|| format!("Failed to export scaled mesh to {:?}", json_path))?;
    }

    let path = match write_scaled_coordinates(&cli.output_dir, &scaled) {
        Ok(path) => path,
        Err(e) => {
            #[cfg(feature = "json_export")]
            if let Some(json_path) = &cli.json {
                let _ = std::fs::remove_file(json_path);
            }
            return Err(e).with_context(|| {
                format!("Failed to write scaled coordinates to {:?}", cli.output_dir)
            });
        }
    };

    if !cli.quiet {
        println!("Wrote {} scaled nodes to {}", scaled.len(), path.display());
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        for cause in e.chain().skip(1) {
            eprintln!("  Caused by: {}", cause);
        }
        std::process::exit(1);
    }
}
