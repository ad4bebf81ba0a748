/// The three axes of a single-track mesh and the controlling regions along each
pub mod axis;
/// Target dimensions and the scale factors derived from them
pub mod factors;
/// Region-by-region scaling along a single axis
pub mod piecewise;
/// Resolving and ordering the controlling regions of an axis
pub mod region;

pub use axis::{Axis, Role};
pub use factors::{dimension_usage, ScaleFactors, TargetDimensions};
pub use piecewise::scale_axis;
pub use region::{resolve_regions, OrderedRegions, Region};

use crate::mesh::Mesh;

use nalgebra::Point3;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use thiserror::Error;
use tracing::info;

/// Nodal coordinates after scaling, in the node order of the source mesh
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledMesh {
    pub node_ids: Vec<usize>,
    pub coords: Vec<Point3<f64>>,
}

impl ScaledMesh {
    pub fn len(&self) -> usize {
        self.node_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Iterate over `(node_id, scaled_point)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Point3<f64>)> + '_ {
        self.node_ids.iter().copied().zip(self.coords.iter())
    }
}

/// Resolve the ordered controlling regions of every axis
pub fn resolve_all<'m>(
    mesh: &'m Mesh,
    factors: &ScaleFactors,
) -> Result<Vec<(Axis, OrderedRegions<'m>)>, ScalingError> {
    Axis::ALL
        .iter()
        .map(|axis| Ok((*axis, resolve_regions(mesh, *axis, factors)?)))
        .collect()
}

/// Rescale every controlling region of the mesh by its factor.
///
/// The mesh is expected to be normalized already (see [`Mesh::translate_to_origin`]).
/// The three axes are independent of each other; with the `parallel` feature they are
/// evaluated concurrently.
pub fn scale_mesh(mesh: &Mesh, factors: &ScaleFactors) -> Result<ScaledMesh, ScalingError> {
    let scale_along = |axis: &Axis| -> Result<Vec<f64>, ScalingError> {
        let regions = resolve_regions(mesh, *axis, factors)?;
        scale_axis(*axis, &regions, &mesh.coordinates_along(axis.component()))
    };

    #[cfg(feature = "parallel")]
    let per_axis = Axis::ALL[..]
        .par_iter()
        .map(scale_along)
        .collect::<Result<Vec<_>, ScalingError>>()?;
    #[cfg(not(feature = "parallel"))]
    let per_axis = Axis::ALL
        .iter()
        .map(scale_along)
        .collect::<Result<Vec<_>, ScalingError>>()?;

    let mut components: [Vec<f64>; 3] = Default::default();
    for (axis, values) in Axis::ALL.iter().zip(per_axis) {
        components[axis.component()] = values;
    }
    let [xs, ys, zs] = components;

    let coords: Vec<Point3<f64>> = xs
        .into_iter()
        .zip(ys)
        .zip(zs)
        .map(|((x, y), z)| Point3::new(x, y, z))
        .collect();

    if let Some(extent) = coords.iter().copied().reduce(|max, p| max.sup(&p)) {
        info!(
            "Scaled {} nodes; new extent: {} (width) x {} (length) x {} (depth)",
            coords.len(),
            extent.x,
            extent.y,
            extent.z
        );
    }

    Ok(ScaledMesh {
        node_ids: mesh.nodes.iter().map(|node| node.id).collect(),
        coords,
    })
}

/// Reasons the controlling regions of a mesh cannot be scaled
#[derive(Debug, Error)]
pub enum ScalingError {
    #[error("{0}\n{usage}", usage = dimension_usage())]
    Configuration(String),
    #[error("No node set named '{name}'; Cannot resolve the {axis} regions!")]
    MissingRegion { axis: Axis, name: &'static str },
    #[error("{count} node sets are named '{name}' (ignoring case); Cannot resolve the {axis} regions!")]
    AmbiguousRegion {
        axis: Axis,
        name: &'static str,
        count: usize,
    },
    #[error("Node set '{name}' has no nodes; Cannot infer the order of the {axis} regions!")]
    EmptyBoundarySet { axis: Axis, name: &'static str },
    #[error("{count} nodes (starting with node {first}) are not in any {axis} region; Cannot scale along {axis}!")]
    UnassignedNodes {
        axis: Axis,
        count: usize,
        first: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_mesh() -> Mesh {
        let mut mesh = Mesh::from_file("./test_input/single_track.inp").unwrap();
        mesh.translate_to_origin();
        mesh
    }

    #[test]
    fn identity_factors_keep_normalized_coordinates() {
        let mesh = reference_mesh();
        let scaled = scale_mesh(&mesh, &ScaleFactors::identity()).unwrap();

        assert_eq!(scaled.len(), mesh.num_nodes());
        for (node, (node_id, p)) in mesh.nodes.iter().zip(scaled.iter()) {
            assert_eq!(node.id, node_id);
            assert!((node.coords - p).norm() < 1e-12);
        }
    }

    #[test]
    fn fixture_length_runs_against_y() {
        let mesh = reference_mesh();
        let regions = resolve_all(&mesh, &ScaleFactors::identity()).unwrap();

        let (axis, length) = &regions[0];
        assert_eq!(*axis, Axis::Length);
        assert_eq!(length[0].role, Role::BasePlateLengthRightMost);
        assert_eq!(length[4].role, Role::BasePlateLengthLeftMost);

        let (_, width) = &regions[1];
        assert_eq!(width[0].role, Role::BasePlateWidthLeftMost);
        assert_eq!(width[0].bounds, Some([0.0, 1.0]));
    }

    #[test]
    fn scaled_region_extents() {
        let mesh = reference_mesh();
        let factors = TargetDimensions::from_slice(&[
            6.0, 1.0, 20.0, 1.0, 6.0, 2.0, 0.5, 1.5, 0.5, 2.0, 4.0, 0.5, 1.0,
        ])
        .unwrap()
        .scale_factors();

        let scaled = scale_mesh(&mesh, &factors).unwrap();
        let max = scaled.coords.iter().fold(Point3::origin(), |max, p| max.sup(p));

        assert!((max.y - 34.0).abs() < 1e-12);
        assert!((max.x - 6.5).abs() < 1e-12);
        assert!((max.z - 5.5).abs() < 1e-12);

        // the deposit length region (originally y in [5, 15]) now spans [7, 27]
        let deposit = mesh
            .node_sets_named(Role::DepositLength.set_name())
            .next()
            .unwrap();
        let ys: Vec<f64> = deposit
            .node_ids
            .iter()
            .map(|node_id| scaled.coords[node_id - 1].y)
            .collect();
        let min_y = ys.iter().cloned().fold(f64::INFINITY, f64::min);
        let max_y = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        assert!((min_y - 7.0).abs() < 1e-12);
        assert!((max_y - 27.0).abs() < 1e-12);
    }

    #[test]
    fn mirrored_mesh_gives_mirrored_result() {
        let mesh = reference_mesh();
        let width = mesh.min_corner().x
            + mesh
                .nodes
                .iter()
                .map(|node| node.coords.x)
                .fold(f64::NEG_INFINITY, f64::max);

        // mirror across the width and swap the left/right set names
        let mut mirrored = mesh.clone();
        for node in mirrored.nodes.iter_mut() {
            node.coords.x = width - node.coords.x;
        }
        for set in mirrored.node_sets.iter_mut() {
            set.name = match set.name.as_str() {
                "setControllingBasePlateWidthLeftMost" => "setControllingBasePlateWidthRightMost",
                "setControllingBasePlateWidthLeft" => "setControllingBasePlateWidthRight",
                "setControllingBasePlateWidthRight" => "setControllingBasePlateWidthLeft",
                "setControllingBasePlateWidthRightMost" => "setControllingBasePlateWidthLeftMost",
                other => other,
            }
            .to_string();
        }

        let factors = ScaleFactors::identity()
            .with(Role::BasePlateWidthLeftMost, 2.0)
            .with(Role::BasePlateWidthLeft, 0.5)
            .with(Role::DepositWidth, 3.0);
        let mirrored_factors = ScaleFactors::identity()
            .with(Role::BasePlateWidthRightMost, 2.0)
            .with(Role::BasePlateWidthRight, 0.5)
            .with(Role::DepositWidth, 3.0);

        let scaled = scale_mesh(&mesh, &factors).unwrap();
        let scaled_mirror = scale_mesh(&mirrored, &mirrored_factors).unwrap();

        let total = 2.0 + 0.5 + 3.0 + 1.0 + 1.0;
        for (p, q) in scaled.coords.iter().zip(scaled_mirror.coords.iter()) {
            assert!((p.x - (total - q.x)).abs() < 1e-12);
            assert!((p.y - q.y).abs() < 1e-12);
            assert!((p.z - q.z).abs() < 1e-12);
        }
    }

    #[test]
    fn node_outside_every_region() {
        let mut mesh = reference_mesh();
        for set in mesh.node_sets.iter_mut() {
            set.node_ids.retain(|node_id| *node_id != 1);
        }

        assert!(matches!(
            scale_mesh(&mesh, &ScaleFactors::identity()),
            Err(ScalingError::UnassignedNodes { first: 1, .. })
        ));
    }
}
