use super::{Axis, Region, ScalingError};

use tracing::debug;

/// Scale the coordinates of one axis region by region.
///
/// `original` holds the (normalized) coordinate of every node along `axis`, indexed by
/// `node_id - 1`, and `regions` must be ordered by increasing coordinate. Each region is
/// scaled about its own minimum; the accumulated change in length of all earlier regions
/// is added as a translation so that neighbouring regions stay joined.
///
/// A node that belongs to several regions keeps the value of the last one. Every node
/// must belong to at least one region.
pub fn scale_axis(
    axis: Axis,
    regions: &[Region],
    original: &[f64],
) -> Result<Vec<f64>, ScalingError> {
    let mut scaled: Vec<Option<f64>> = vec![None; original.len()];
    let mut num_overwritten = 0;

    let total_translation = regions.iter().fold(0.0, |translation, region| {
        let (region_coords, next_translation) = region.apply(translation, original);
        for (node_id, coord) in region_coords {
            if scaled[node_id - 1].replace(coord).is_some() {
                num_overwritten += 1;
            }
        }
        next_translation
    });

    debug!(
        "Scaled {} regions along {}; total change in length: {}; {} nodes shared between regions",
        regions.len(),
        axis,
        total_translation,
        num_overwritten
    );

    let mut unassigned = scaled
        .iter()
        .enumerate()
        .filter(|(_, coord)| coord.is_none())
        .map(|(idx, _)| idx + 1);

    if let Some(first) = unassigned.next() {
        return Err(ScalingError::UnassignedNodes {
            axis,
            count: unassigned.count() + 1,
            first,
        });
    }

    Ok(scaled.into_iter().flatten().collect())
}
