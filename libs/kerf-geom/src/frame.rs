//! Frames: local 2D to 3D embeddings along a sweep path.

use glam::{DVec2, DVec3};

/// A local origin plus two axis vectors.
///
/// A frame places profile space in 3D at one path parameter: profile
/// point `(u, v)` lands at `origin + u * x_axis + v * y_axis`. The axes
/// are not required to be unit length or orthogonal; scaling and shear
/// along a sweep fall out of non-unit axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Where the profile origin lands.
    pub origin: DVec3,
    /// Image of the profile's +u direction.
    pub x_axis: DVec3,
    /// Image of the profile's +v direction.
    pub y_axis: DVec3,
}

impl Frame {
    /// The world xy-plane at the world origin.
    pub const IDENTITY: Self = Self {
        origin: DVec3::ZERO,
        x_axis: DVec3::X,
        y_axis: DVec3::Y,
    };

    /// A frame from its parts.
    #[must_use]
    pub const fn new(origin: DVec3, x_axis: DVec3, y_axis: DVec3) -> Self {
        Self {
            origin,
            x_axis,
            y_axis,
        }
    }

    /// The world xy-plane lifted to height `z`.
    #[must_use]
    pub fn at_height(z: f64) -> Self {
        Self {
            origin: DVec3::new(0.0, 0.0, z),
            ..Self::IDENTITY
        }
    }

    /// Embeds a profile point into 3D.
    #[must_use]
    #[inline]
    pub fn project(&self, point: DVec2) -> DVec3 {
        self.origin + self.x_axis * point.x + self.y_axis * point.y
    }

    /// The frame's facing direction, `x_axis x y_axis`.
    #[must_use]
    pub fn normal(&self) -> DVec3 {
        self.x_axis.cross(self.y_axis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_follows_the_axes() {
        let frame = Frame::new(
            DVec3::new(1.0, 0.0, 5.0),
            DVec3::new(0.0, 2.0, 0.0),
            DVec3::new(0.0, 0.0, 1.0),
        );
        let p = frame.project(DVec2::new(3.0, 4.0));
        assert_eq!(p, DVec3::new(1.0, 6.0, 9.0));
    }

    #[test]
    fn identity_faces_up() {
        assert_eq!(Frame::IDENTITY.normal(), DVec3::Z);
        assert_eq!(Frame::at_height(2.0).project(DVec2::ZERO), DVec3::new(0.0, 0.0, 2.0));
    }
}
