//! Quantized-coordinate vertex welding.

use config::constants::WELD_EPSILON;
use glam::DVec3;
use rustc_hash::FxHashMap;

/// Spatial hash merging near-identical vertices into one index.
///
/// Coordinates are snapped to a grid of [`WELD_EPSILON`] cells; points
/// landing in the same cell share a vertex. One map lives for the
/// duration of one mesh construction or one sweep and is dropped with
/// its builder.
#[derive(Debug, Default)]
pub(crate) struct WeldMap {
    cells: FxHashMap<[i64; 3], u32>,
}

impl WeldMap {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Returns the vertex index for `point`, appending a new vertex to
    /// `vertices` the first time its grid cell is seen.
    pub(crate) fn index_for(&mut self, point: DVec3, vertices: &mut Vec<DVec3>) -> u32 {
        *self.cells.entry(quantize(point)).or_insert_with(|| {
            let index = vertices.len() as u32;
            vertices.push(point);
            index
        })
    }
}

fn quantize(point: DVec3) -> [i64; 3] {
    [
        (point.x / WELD_EPSILON).round() as i64,
        (point.y / WELD_EPSILON).round() as i64,
        (point.z / WELD_EPSILON).round() as i64,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearby_points_share_one_index() {
        let mut weld = WeldMap::new();
        let mut vertices = Vec::new();

        let a = weld.index_for(DVec3::new(1.0, 2.0, 3.0), &mut vertices);
        let b = weld.index_for(DVec3::new(1.0 + WELD_EPSILON * 0.25, 2.0, 3.0), &mut vertices);
        let c = weld.index_for(DVec3::new(1.0, 2.0, 3.0 + WELD_EPSILON * 4.0), &mut vertices);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(vertices.len(), 2);
    }

    #[test]
    fn first_point_in_a_cell_wins() {
        let mut weld = WeldMap::new();
        let mut vertices = Vec::new();

        let original = DVec3::new(0.5, 0.5, 0.5);
        weld.index_for(original, &mut vertices);
        weld.index_for(original + DVec3::splat(WELD_EPSILON * 0.1), &mut vertices);

        assert_eq!(vertices, vec![original]);
    }
}
