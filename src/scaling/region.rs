use super::{Axis, Role, ScaleFactors, ScalingError};
use crate::mesh::{Mesh, NodeSet};

use smallvec::SmallVec;
use tracing::info;

/// The controlling regions of one axis, ordered by increasing coordinate
pub type OrderedRegions<'m> = SmallVec<[Region<'m>; 5]>;

/// One controlling region along one axis, as resolved from its node set
#[derive(Debug, Clone, PartialEq)]
pub struct Region<'m> {
    pub role: Role,
    pub scale: f64,
    /// smallest and largest member coordinate along the axis; `None` if the set has no members
    pub bounds: Option<[f64; 2]>,
    pub node_ids: &'m [usize],
}

impl<'m> Region<'m> {
    /// Extent of the region before scaling
    pub fn length(&self) -> f64 {
        self.bounds.map_or(0.0, |[min, max]| max - min)
    }

    pub fn scaled_length(&self) -> f64 {
        self.length() * self.scale
    }

    /// How far every region after this one has to move to stay attached to it
    pub fn span_change(&self) -> f64 {
        self.length() * (self.scale - 1.0)
    }

    /// Scale `coord` about the region's own minimum, then shift it by `translation`
    pub fn map(&self, translation: f64, coord: f64) -> f64 {
        match self.bounds {
            Some([min, _]) => translation + min + (coord - min) * self.scale,
            None => translation + coord,
        }
    }

    /// Apply this region to the original coordinates of its members.
    ///
    /// Returns the `(node_id, scaled_coordinate)` pairs and the translation for the next region.
    pub fn apply(&self, translation: f64, original: &[f64]) -> (Vec<(usize, f64)>, f64) {
        let scaled = self
            .node_ids
            .iter()
            .map(|node_id| (*node_id, self.map(translation, original[node_id - 1])))
            .collect();

        (scaled, translation + self.span_change())
    }
}

/// Find the controlling regions of `axis` in the mesh and order them by increasing coordinate.
///
/// The ordering is inferred from the two boundary sets of the axis: if the "left" (or "bottom")
/// set starts below the "right" (or "top") set the nominal role order is kept, otherwise the
/// whole order is reversed. Each region carries the scale factor of its own role, so the
/// factors are reversed along with the roles.
pub fn resolve_regions<'m>(
    mesh: &'m Mesh,
    axis: Axis,
    factors: &ScaleFactors,
) -> Result<OrderedRegions<'m>, ScalingError> {
    let component = axis.component();

    let [low_min, high_min] = axis.boundary_roles().map(|role| {
        let set = unique_node_set(mesh, axis, role)?;
        set.bounds_along(&mesh.nodes, component)
            .map(|[min, _]| min)
            .ok_or(ScalingError::EmptyBoundarySet {
                axis,
                name: role.set_name(),
            })
    });
    let ascending = low_min? < high_min?;

    let mut roles: SmallVec<[Role; 5]> = axis.roles().iter().copied().collect();
    if !ascending {
        roles.reverse();
    }

    info!(
        "{} regions run {} the coordinate direction: {:?}",
        axis,
        if ascending { "along" } else { "against" },
        roles
    );

    roles
        .into_iter()
        .map(|role| {
            let set = unique_node_set(mesh, axis, role)?;
            Ok(Region {
                role,
                scale: factors.get(role),
                bounds: set.bounds_along(&mesh.nodes, component),
                node_ids: &set.node_ids,
            })
        })
        .collect()
}

fn unique_node_set<'m>(mesh: &'m Mesh, axis: Axis, role: Role) -> Result<&'m NodeSet, ScalingError> {
    let name = role.set_name();
    let mut matches = mesh.node_sets_named(name);

    match (matches.next(), matches.count()) {
        (Some(set), 0) => Ok(set),
        (Some(_), others) => Err(ScalingError::AmbiguousRegion {
            axis,
            name,
            count: others + 1,
        }),
        (None, _) => Err(ScalingError::MissingRegion { axis, name }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Node;

    // nodes along z only: 1 @ 0.0, 2 @ 1.0, 3 @ 1.75, 4 @ 2.25
    fn depth_mesh(flipped: bool) -> Mesh {
        let zs = [0.0, 1.0, 1.75, 2.25];
        let nodes = zs
            .iter()
            .enumerate()
            .map(|(idx, z)| {
                let z = if flipped { 2.25 - z } else { *z };
                Node::from_coords(idx + 1, 0.0, 0.0, z)
            })
            .collect();

        Mesh::new(
            nodes,
            vec![
                NodeSet::new("setControllingBasePlateDepthBottom", vec![1, 2]),
                NodeSet::new("SETCONTROLLINGBASEPLATEDEPTHTOP", vec![2, 3]),
                NodeSet::new("setControllingDepositDepth", vec![3, 4]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn ascending_order() {
        let mesh = depth_mesh(false);
        let factors = ScaleFactors::identity().with(Role::DepositDepth, 3.0);
        let regions = resolve_regions(&mesh, Axis::Depth, &factors).unwrap();

        let roles: Vec<Role> = regions.iter().map(|r| r.role).collect();
        assert_eq!(
            roles,
            [Role::BasePlateDepthBottom, Role::BasePlateDepthTop, Role::DepositDepth]
        );
        assert_eq!(regions[0].bounds, Some([0.0, 1.0]));
        assert_eq!(regions[1].bounds, Some([1.0, 1.75]));
        assert_eq!(regions[2].bounds, Some([1.75, 2.25]));
        assert_eq!(regions[2].scale, 3.0);
        assert_eq!(regions[1].node_ids, &[2, 3]);
    }

    #[test]
    fn reversed_order_keeps_factors_with_their_roles() {
        let mesh = depth_mesh(true);
        let factors = ScaleFactors::identity()
            .with(Role::BasePlateDepthBottom, 2.0)
            .with(Role::DepositDepth, 3.0);
        let regions = resolve_regions(&mesh, Axis::Depth, &factors).unwrap();

        let roles: Vec<Role> = regions.iter().map(|r| r.role).collect();
        assert_eq!(
            roles,
            [Role::DepositDepth, Role::BasePlateDepthTop, Role::BasePlateDepthBottom]
        );
        assert_eq!(regions[0].scale, 3.0);
        assert_eq!(regions[2].scale, 2.0);
        assert_eq!(regions[0].bounds, Some([0.0, 0.5]));
        assert_eq!(regions[2].bounds, Some([1.25, 2.25]));
    }

    #[test]
    fn missing_region() {
        let mut mesh = depth_mesh(false);
        mesh.node_sets.remove(1);

        let resolved = resolve_regions(&mesh, Axis::Depth, &ScaleFactors::identity());
        match resolved {
            Err(ScalingError::MissingRegion { axis, name }) => {
                assert_eq!(axis, Axis::Depth);
                assert_eq!(name, "setControllingBasePlateDepthTop");
            }
            other => panic!("expected a missing region, got {:?}", other),
        }
    }

    #[test]
    fn missing_boundary_set() {
        let mut mesh = depth_mesh(false);
        mesh.node_sets.remove(0);

        assert!(matches!(
            resolve_regions(&mesh, Axis::Depth, &ScaleFactors::identity()),
            Err(ScalingError::MissingRegion {
                name: "setControllingBasePlateDepthBottom",
                ..
            })
        ));
    }

    #[test]
    fn ambiguous_region() {
        let mut mesh = depth_mesh(false);
        mesh.node_sets
            .push(NodeSet::new("setcontrollingbaseplatedepthtop", vec![3]));

        assert!(matches!(
            resolve_regions(&mesh, Axis::Depth, &ScaleFactors::identity()),
            Err(ScalingError::AmbiguousRegion { count: 2, .. })
        ));
    }

    #[test]
    fn empty_boundary_set() {
        let mut mesh = depth_mesh(false);
        mesh.node_sets[2].node_ids.clear();

        assert!(matches!(
            resolve_regions(&mesh, Axis::Depth, &ScaleFactors::identity()),
            Err(ScalingError::EmptyBoundarySet { axis: Axis::Depth, .. })
        ));
    }

    #[test]
    fn empty_controlling_region() {
        let mut mesh = depth_mesh(false);
        mesh.node_sets[1].node_ids.clear();

        let regions = resolve_regions(&mesh, Axis::Depth, &ScaleFactors::identity()).unwrap();
        assert_eq!(regions[1].bounds, None);
        assert_eq!(regions[1].length(), 0.0);
        assert_eq!(regions[1].span_change(), 0.0);
    }

    #[test]
    fn region_local_affine_law() {
        let region = Region {
            role: Role::DepositLength,
            scale: 1.5,
            bounds: Some([2.0, 6.0]),
            node_ids: &[],
        };

        for (coord, translation) in [(2.0, 0.0), (3.0, 1.0), (6.0, -0.5)] {
            let expected = translation + 2.0 + (coord - 2.0) * 1.5;
            assert!((region.map(translation, coord) - expected).abs() < 1e-14);
        }
        assert!((region.span_change() - 2.0).abs() < 1e-14);
        assert!((region.scaled_length() - 6.0).abs() < 1e-14);
    }
}
