//! Splitting planes for BSP nodes.

use glam::DVec3;

/// Side classification thickness. Vertices within this distance of a
/// plane count as on it, which keeps nearly-coplanar facets from being
/// shredded into slivers.
pub(crate) const PLANE_EPSILON: f64 = 1e-5;

/// Where geometry sits relative to a plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Classification {
    /// Within [`PLANE_EPSILON`] of the plane.
    Coplanar,
    /// Strictly on the normal side.
    Front,
    /// Strictly on the anti-normal side.
    Back,
    /// Vertices on both strict sides.
    Spanning,
}

/// An oriented plane in Hessian normal form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Plane {
    normal: DVec3,
    offset: f64,
}

impl Plane {
    /// Plane through three points, `None` when they are collinear.
    pub fn from_points(a: DVec3, b: DVec3, c: DVec3) -> Option<Self> {
        let normal = (b - a).cross(c - a).try_normalize()?;
        Some(Self {
            normal,
            offset: normal.dot(a),
        })
    }

    pub fn normal(&self) -> DVec3 {
        self.normal
    }

    /// Reverses which side counts as front.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.offset = -self.offset;
    }

    /// Distance from the plane, positive on the normal side.
    pub fn signed_distance(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.offset
    }

    pub fn classify_point(&self, point: DVec3) -> Classification {
        let distance = self.signed_distance(point);
        if distance > PLANE_EPSILON {
            Classification::Front
        } else if distance < -PLANE_EPSILON {
            Classification::Back
        } else {
            Classification::Coplanar
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_through_the_unit_square_points_up() {
        let plane = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
        assert_eq!(plane.normal(), DVec3::Z);
        assert_eq!(plane.classify_point(DVec3::Z), Classification::Front);
        assert_eq!(plane.classify_point(-DVec3::Z), Classification::Back);
        assert_eq!(
            plane.classify_point(DVec3::new(4.0, -2.0, 0.0)),
            Classification::Coplanar
        );
    }

    #[test]
    fn collinear_points_define_no_plane() {
        assert!(Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::X * 2.0).is_none());
    }

    #[test]
    fn flip_swaps_the_sides() {
        let mut plane = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
        plane.flip();
        assert_eq!(plane.normal(), -DVec3::Z);
        assert_eq!(plane.classify_point(DVec3::Z), Classification::Back);
    }
}
