//! Rescale a single-track (weld deposit on base plate) finite element mesh without remeshing.
//!
//! The reference mesh tags its regions with node sets: five along the track length, five
//! across its width and three through the depth. Each region is stretched along its axis by
//! its own factor and the following regions are shifted so that nothing separates or overlaps.
//! Node ids and element connectivity are untouched.
//!
//! ```no_run
//! use track_mesh_scale::{scale_mesh, write_scaled_coordinates, Mesh, TargetDimensions};
//!
//! let mut mesh = Mesh::from_file("reference.inp").unwrap();
//! mesh.translate_to_origin();
//!
//! let factors = TargetDimensions::from_slice(&[
//!     3.0, 2.0, 15.0, 2.0, 3.0, // length
//!     1.0, 1.0, 1.2, 1.0, 1.0, // width
//!     1.0, 0.75, 0.6, // depth
//! ])
//! .unwrap()
//! .scale_factors();
//!
//! let scaled = scale_mesh(&mesh, &factors).unwrap();
//! write_scaled_coordinates("./out", &scaled).unwrap();
//! ```

/// Nodes and node sets of a reference mesh
pub mod mesh;
/// Writing scaled nodal coordinates
pub mod output;
/// Piecewise-affine rescaling of the controlling regions
pub mod scaling;

pub use mesh::{Mesh, MeshError, Node, NodeSet};
pub use output::{write_scaled_coordinates, SCALED_COORDS_FILE_NAME};
pub use scaling::{
    resolve_all, scale_mesh, Axis, Region, Role, ScaleFactors, ScaledMesh, ScalingError,
    TargetDimensions,
};
