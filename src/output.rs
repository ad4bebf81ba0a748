use crate::scaling::ScaledMesh;

use nalgebra::Point3;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Name of the scaled coordinate file written into the output directory
pub const SCALED_COORDS_FILE_NAME: &str = "nodalCoordsScaled.dat";

/// One line of the scaled coordinate file (without the newline).
///
/// ```text
///        1,              0.0000000000,              3.5000000000,              1.2500000000
/// ```
/// The node id is right-aligned in 8 columns; each coordinate is preceded by `", "` and
/// right-aligned in 25 columns with 10 decimal places.
pub fn format_node_line(node_id: usize, p: &Point3<f64>) -> String {
    format!("{:8}, {:25.10}, {:25.10}, {:25.10}", node_id, p.x, p.y, p.z)
}

/// Write the scaled nodal coordinates to `<dir>/nodalCoordsScaled.dat`, one line per node.
///
/// The directory is created if necessary. The data is written to a temporary file first,
/// so a failed write never leaves a truncated result behind.
pub fn write_scaled_coordinates(
    dir: impl AsRef<Path>,
    scaled: &ScaledMesh,
) -> std::io::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = dir.join(SCALED_COORDS_FILE_NAME);
    let partial_path = dir.join(format!("{}.partial", SCALED_COORDS_FILE_NAME));

    let written = write_lines(&partial_path, scaled);
    if let Err(e) = written {
        let _ = fs::remove_file(&partial_path);
        return Err(e);
    }
    fs::rename(&partial_path, &path)?;

    info!("Wrote {} scaled nodes to {:?}", scaled.len(), path);

    Ok(path)
}

fn write_lines(path: &Path, scaled: &ScaledMesh) -> std::io::Result<()> {
    let f = File::create(path)?;
    let mut w = BufWriter::new(f);

    for (node_id, p) in scaled.iter() {
        writeln!(w, "{}", format_node_line(node_id, p))?;
    }

    w.flush()
}
