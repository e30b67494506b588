//! # Contours
//!
//! The 2D geometry model. A [`Polygon`] is one closed ring of vertices.
//! A [`Shape`] is an outer ring with zero or more holes. A [`Contour`] is
//! a set of disjoint shapes and is the 2D currency of the whole pipeline:
//! profile clipping, sweeping, and the flat primitives all speak
//! `Contour`.
//!
//! ## Winding
//!
//! Shapes normalize their rings on construction: outer rings run
//! counter-clockwise, holes clockwise. Code that receives a bare ring
//! soup (a clipping backend, an interchange record) recovers the roles
//! from ring winding with [`Contour::from_raw_polygons`].
//!
//! ## Validation
//!
//! The checked constructors reject holes that escape their outer ring,
//! holes that overlap each other, and shapes that overlap each other.
//! These checks are quadratic in edge count; callers that already hold
//! well-formed rings (clip backends, the primitive generators) use the
//! `_unchecked` constructors to skip them.

use crate::error::GeomError;
use crate::predicates::{self, Boundary};
use crate::triangulate;
use config::constants::EPSILON_TOLERANCE;
use glam::{DMat2, DVec2};
use rayon::prelude::*;

/// Requested orientation for triangles produced by triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    /// Counter-clockwise triangles.
    Ccw,
    /// Clockwise triangles.
    Cw,
}

/// A closed polygonal ring.
///
/// The last vertex connects back to the first implicitly; rings are
/// never stored with a duplicated closing vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<DVec2>,
}

impl Polygon {
    /// Creates a ring, rejecting fewer than three vertices and rings
    /// whose area vanishes.
    pub fn new(points: Vec<DVec2>) -> Result<Self, GeomError> {
        if points.len() < 3 {
            return Err(GeomError::TooFewVertices {
                count: points.len(),
            });
        }
        let ring = Self { points };
        if ring.signed_area().abs() <= EPSILON_TOLERANCE {
            return Err(GeomError::degenerate("polygon encloses no area"));
        }
        Ok(ring)
    }

    /// Creates a ring without validation.
    #[must_use]
    pub fn new_unchecked(points: Vec<DVec2>) -> Self {
        Self { points }
    }

    /// The ring's vertices in order.
    #[must_use]
    #[inline]
    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Signed area of the ring, positive when counter-clockwise.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        predicates::signed_area(&self.points)
    }

    /// Whether the ring runs counter-clockwise.
    #[must_use]
    pub fn is_ccw(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// A copy of the ring with reversed vertex order.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            points: self.points.iter().rev().copied().collect(),
        }
    }

    /// Consumes the ring, reversing it if needed to match `winding`.
    #[must_use]
    pub fn oriented(mut self, winding: Winding) -> Self {
        if self.is_ccw() != (winding == Winding::Ccw) {
            self.points.reverse();
        }
        self
    }

    /// Axis-aligned bounding box as `(min, max)`.
    #[must_use]
    pub fn bounds(&self) -> (DVec2, DVec2) {
        let mut min = DVec2::splat(f64::INFINITY);
        let mut max = DVec2::splat(f64::NEG_INFINITY);
        for point in &self.points {
            min = min.min(*point);
            max = max.max(*point);
        }
        (min, max)
    }

    fn map(&self, f: impl Fn(DVec2) -> DVec2) -> Self {
        Self {
            points: self.points.iter().map(|p| f(*p)).collect(),
        }
    }
}

/// One outer ring with zero or more holes cut out of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    outer: Polygon,
    holes: Vec<Polygon>,
}

impl Shape {
    /// Creates a shape, normalizing ring winding and validating that
    /// every hole lies properly inside the outer ring and that holes do
    /// not touch each other.
    pub fn new(outer: Polygon, holes: Vec<Polygon>) -> Result<Self, GeomError> {
        let shape = Self::new_unchecked(outer, holes);

        for (index, hole) in shape.holes.iter().enumerate() {
            if !ring_properly_inside(hole, &shape.outer) {
                return Err(GeomError::HoleOutsideOuter { index });
            }
        }
        for (first, hole) in shape.holes.iter().enumerate() {
            for (offset, other) in shape.holes.iter().enumerate().skip(first + 1) {
                if predicates::polygons_intersect(hole.points(), other.points()) {
                    return Err(GeomError::OverlappingHoles {
                        first,
                        second: offset,
                    });
                }
            }
        }
        Ok(shape)
    }

    /// Creates a shape without containment checks.
    ///
    /// Winding is still normalized, so the outer/hole invariant holds
    /// even on this path.
    #[must_use]
    pub fn new_unchecked(outer: Polygon, holes: Vec<Polygon>) -> Self {
        Self {
            outer: outer.oriented(Winding::Ccw),
            holes: holes
                .into_iter()
                .map(|hole| hole.oriented(Winding::Cw))
                .collect(),
        }
    }

    /// The outer boundary ring, counter-clockwise.
    #[must_use]
    #[inline]
    pub fn outer(&self) -> &Polygon {
        &self.outer
    }

    /// The hole rings, each clockwise.
    #[must_use]
    #[inline]
    pub fn holes(&self) -> &[Polygon] {
        &self.holes
    }

    /// Net enclosed area: the outer area minus all hole areas.
    #[must_use]
    pub fn area(&self) -> f64 {
        // Holes are clockwise, so their signed areas subtract.
        self.outer.signed_area() + self.holes.iter().map(Polygon::signed_area).sum::<f64>()
    }

    /// Whether `point` lies in the shape's region.
    ///
    /// Both the outer boundary and hole boundaries count as part of the
    /// shape.
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        predicates::point_in_polygon(point, self.outer.points(), Boundary::Inside)
            && self
                .holes
                .iter()
                .all(|hole| !predicates::point_in_polygon(point, hole.points(), Boundary::Outside))
    }

    /// Triangulates the shape, holes and all, into a triangle soup with
    /// the requested winding.
    pub fn triangulate(&self, winding: Winding) -> Result<Vec<[DVec2; 3]>, GeomError> {
        triangulate::earclip(self, winding)
    }

    fn map(&self, f: impl Fn(DVec2) -> DVec2) -> Self {
        // Mirroring transforms flip ring orientation, so re-normalize.
        Self::new_unchecked(
            self.outer.map(&f),
            self.holes.iter().map(|hole| hole.map(&f)).collect(),
        )
    }
}

/// A set of disjoint shapes.
///
/// This is what the 2D boolean backends consume and produce and what
/// the sweep engine extrudes.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    shapes: Vec<Shape>,
}

impl Contour {
    /// Creates a contour, validating that the shapes' regions are
    /// pairwise disjoint.
    ///
    /// A shape nested inside another shape's hole is disjoint and
    /// therefore allowed.
    pub fn new(shapes: Vec<Shape>) -> Result<Self, GeomError> {
        for (first, a) in shapes.iter().enumerate() {
            for (offset, b) in shapes.iter().enumerate().skip(first + 1) {
                if regions_overlap(a, b) {
                    return Err(GeomError::OverlappingShapes {
                        first,
                        second: offset,
                    });
                }
            }
        }
        Ok(Self { shapes })
    }

    /// Creates a contour without the disjointness check.
    #[must_use]
    pub fn new_unchecked(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }

    /// A contour holding one shape.
    #[must_use]
    pub fn from_shape(shape: Shape) -> Self {
        Self {
            shapes: vec![shape],
        }
    }

    /// A contour holding one hole-free shape built from a bare ring.
    pub fn from_points(points: Vec<DVec2>) -> Result<Self, GeomError> {
        Ok(Self::from_shape(Shape::new(Polygon::new(points)?, Vec::new())?))
    }

    /// Rebuilds shape structure from a flat list of rings.
    ///
    /// Ring roles are recovered from winding: counter-clockwise rings
    /// are outers, clockwise rings are holes. Each hole attaches to the
    /// first outer, in input order, whose region contains the hole's
    /// first vertex. A hole contained by no outer is an error.
    ///
    /// The rings are trusted to be pairwise disjoint, as clip backend
    /// output is.
    pub fn from_raw_polygons(rings: Vec<Vec<DVec2>>) -> Result<Self, GeomError> {
        let mut outers: Vec<(Polygon, Vec<Polygon>)> = Vec::new();
        let mut holes: Vec<Polygon> = Vec::new();
        for ring in rings {
            let polygon = Polygon::new(ring)?;
            if polygon.is_ccw() {
                outers.push((polygon, Vec::new()));
            } else {
                holes.push(polygon);
            }
        }

        for (index, hole) in holes.into_iter().enumerate() {
            let probe = hole.points()[0];
            let owner = outers.iter().position(|(outer, _)| {
                predicates::point_in_polygon(probe, outer.points(), Boundary::Inside)
            });
            match owner {
                Some(i) => outers[i].1.push(hole),
                None => return Err(GeomError::HoleOutsideOuter { index }),
            }
        }

        Ok(Self::new_unchecked(
            outers
                .into_iter()
                .map(|(outer, holes)| Shape::new_unchecked(outer, holes))
                .collect(),
        ))
    }

    /// The shapes making up this contour.
    #[must_use]
    #[inline]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// Whether the contour holds no shapes at all.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Whether `point` lies in any shape's region.
    #[must_use]
    pub fn contains(&self, point: DVec2) -> bool {
        self.shapes.iter().any(|shape| shape.contains(point))
    }

    /// Net enclosed area over all shapes.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.shapes.iter().map(Shape::area).sum()
    }

    /// Axis-aligned bounding box over all shapes, `None` when empty.
    #[must_use]
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        self.shapes
            .iter()
            .map(|shape| shape.outer.bounds())
            .reduce(|(min_a, max_a), (min_b, max_b)| (min_a.min(min_b), max_a.max(max_b)))
    }

    /// Triangulates every shape, in parallel when there are several.
    pub fn triangulate(&self, winding: Winding) -> Result<Vec<[DVec2; 3]>, GeomError> {
        let per_shape: Vec<Vec<[DVec2; 3]>> = self
            .shapes
            .par_iter()
            .map(|shape| shape.triangulate(winding))
            .collect::<Result<_, _>>()?;
        Ok(per_shape.into_iter().flatten().collect())
    }

    /// The contour moved by `offset`.
    #[must_use]
    pub fn translated(&self, offset: DVec2) -> Self {
        self.map(|p| p + offset)
    }

    /// The contour scaled per axis about the origin.
    #[must_use]
    pub fn scaled(&self, factor: DVec2) -> Self {
        self.map(|p| p * factor)
    }

    /// The contour rotated about the origin by `angle` radians.
    #[must_use]
    pub fn rotated(&self, angle: f64) -> Self {
        let rotation = DMat2::from_angle(angle);
        self.map(|p| rotation * p)
    }

    fn map(&self, f: impl Fn(DVec2) -> DVec2) -> Self {
        Self {
            shapes: self.shapes.iter().map(|shape| shape.map(&f)).collect(),
        }
    }
}

/// Whether `inner` sits strictly inside `outer` with no boundary contact.
fn ring_properly_inside(inner: &Polygon, outer: &Polygon) -> bool {
    !predicates::edges_intersect(inner.points(), outer.points())
        && predicates::point_in_polygon(inner.points()[0], outer.points(), Boundary::Outside)
}

/// Whether the regions of two shapes share any point.
fn regions_overlap(a: &Shape, b: &Shape) -> bool {
    let a_rings = std::iter::once(&a.outer).chain(a.holes.iter());
    for ring_a in a_rings {
        let b_rings = std::iter::once(&b.outer).chain(b.holes.iter());
        for ring_b in b_rings {
            if predicates::edges_intersect(ring_a.points(), ring_b.points()) {
                return true;
            }
        }
    }
    // No boundary contact: each shape is entirely inside or entirely
    // outside the other's region, so probe one vertex each way.
    interior_probe(b, a.outer.points()[0]) || interior_probe(a, b.outer.points()[0])
}

fn interior_probe(shape: &Shape, point: DVec2) -> bool {
    predicates::point_in_polygon(point, shape.outer.points(), Boundary::Outside)
        && shape
            .holes
            .iter()
            .all(|hole| !predicates::point_in_polygon(point, hole.points(), Boundary::Inside))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(size: f64, centre: DVec2) -> Polygon {
        let half = size * 0.5;
        Polygon::new_unchecked(vec![
            centre + DVec2::new(-half, -half),
            centre + DVec2::new(half, -half),
            centre + DVec2::new(half, half),
            centre + DVec2::new(-half, half),
        ])
    }

    #[test]
    fn polygon_rejects_degenerate_input() {
        let too_few = Polygon::new(vec![DVec2::ZERO, DVec2::X]);
        assert_eq!(too_few, Err(GeomError::TooFewVertices { count: 2 }));

        let collinear = Polygon::new(vec![
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(2.0, 0.0),
        ]);
        assert!(matches!(collinear, Err(GeomError::Degenerate { .. })));
    }

    #[test]
    fn shape_normalizes_ring_winding() {
        let outer = square(2.0, DVec2::ZERO).reversed();
        let hole = square(1.0, DVec2::ZERO);
        assert!(!outer.is_ccw());
        assert!(hole.is_ccw());

        let shape = Shape::new(outer, vec![hole]).unwrap();
        assert!(shape.outer().is_ccw());
        assert!(!shape.holes()[0].is_ccw());
    }

    #[test]
    fn shape_rejects_escaping_hole() {
        let result = Shape::new(square(2.0, DVec2::ZERO), vec![square(1.0, DVec2::new(5.0, 0.0))]);
        assert_eq!(result, Err(GeomError::HoleOutsideOuter { index: 0 }));

        // Touching the outer boundary is escape too.
        let result = Shape::new(square(2.0, DVec2::ZERO), vec![square(1.0, DVec2::new(0.5, 0.0))]);
        assert_eq!(result, Err(GeomError::HoleOutsideOuter { index: 0 }));
    }

    #[test]
    fn shape_rejects_overlapping_holes() {
        let result = Shape::new(
            square(4.0, DVec2::ZERO),
            vec![
                square(1.0, DVec2::new(-0.5, 0.0)),
                square(1.0, DVec2::new(0.5, 0.0)),
            ],
        );
        assert_eq!(result, Err(GeomError::OverlappingHoles { first: 0, second: 1 }));
    }

    #[test]
    fn square_with_hole_classifies_points() {
        let shape = Shape::new(square(4.0, DVec2::ZERO), vec![square(2.0, DVec2::ZERO)]).unwrap();

        assert!(shape.contains(DVec2::new(1.5, 0.0)));
        assert!(!shape.contains(DVec2::ZERO));
        assert!(!shape.contains(DVec2::new(5.0, 0.0)));
        // Boundaries belong to the shape on both rings.
        assert!(shape.contains(DVec2::new(2.0, 0.0)));
        assert!(shape.contains(DVec2::new(1.0, 0.0)));
    }

    #[test]
    fn area_subtracts_holes() {
        let shape = Shape::new(square(4.0, DVec2::ZERO), vec![square(2.0, DVec2::ZERO)]).unwrap();
        assert_relative_eq!(shape.area(), 12.0);

        let contour = Contour::from_shape(shape);
        assert_relative_eq!(contour.area(), 12.0);
    }

    #[test]
    fn contour_allows_shape_inside_a_hole() {
        let washer = Shape::new(square(4.0, DVec2::ZERO), vec![square(2.0, DVec2::ZERO)]).unwrap();
        let dot = Shape::new(square(1.0, DVec2::ZERO), Vec::new()).unwrap();

        let contour = Contour::new(vec![washer, dot]).unwrap();
        assert_eq!(contour.shapes().len(), 2);
        assert_relative_eq!(contour.area(), 13.0);
    }

    #[test]
    fn contour_rejects_overlapping_shapes() {
        let a = Shape::new(square(2.0, DVec2::ZERO), Vec::new()).unwrap();
        let b = Shape::new(square(2.0, DVec2::new(1.0, 0.0)), Vec::new()).unwrap();
        let result = Contour::new(vec![a, b]);
        assert_eq!(result, Err(GeomError::OverlappingShapes { first: 0, second: 1 }));
    }

    #[test]
    fn raw_rings_regroup_by_winding() {
        let rings = vec![
            square(4.0, DVec2::ZERO).points().to_vec(),
            square(2.0, DVec2::ZERO).reversed().points().to_vec(),
            square(1.0, DVec2::new(10.0, 0.0)).points().to_vec(),
        ];
        let contour = Contour::from_raw_polygons(rings).unwrap();

        assert_eq!(contour.shapes().len(), 2);
        assert_eq!(contour.shapes()[0].holes().len(), 1);
        assert_eq!(contour.shapes()[1].holes().len(), 0);
    }

    #[test]
    fn raw_hole_without_owner_is_rejected() {
        let rings = vec![
            square(2.0, DVec2::ZERO).points().to_vec(),
            square(1.0, DVec2::new(10.0, 0.0)).reversed().points().to_vec(),
        ];
        let result = Contour::from_raw_polygons(rings);
        assert_eq!(result, Err(GeomError::HoleOutsideOuter { index: 0 }));
    }

    #[test]
    fn hole_attaches_to_the_first_containing_outer() {
        // An island inside the hole of a bigger shape. Listing the
        // island first makes first-containing-outer assignment land the
        // pinhole on the island rather than the big outer.
        let rings = vec![
            square(4.0, DVec2::ZERO).points().to_vec(),
            square(2.0, DVec2::ZERO).reversed().points().to_vec(),
            square(8.0, DVec2::ZERO).points().to_vec(),
            square(6.0, DVec2::ZERO).reversed().points().to_vec(),
        ];
        let contour = Contour::from_raw_polygons(rings).unwrap();

        assert_eq!(contour.shapes().len(), 2);
        for shape in contour.shapes() {
            assert_eq!(shape.holes().len(), 1);
        }
        assert_relative_eq!(contour.area(), (16.0 - 4.0) + (64.0 - 36.0));
    }

    #[test]
    fn mirroring_scale_keeps_winding_normalized() {
        let shape = Shape::new(square(2.0, DVec2::new(3.0, 0.0)), Vec::new()).unwrap();
        let contour = Contour::from_shape(shape);

        let mirrored = contour.scaled(DVec2::new(-1.0, 1.0));
        assert!(mirrored.shapes()[0].outer().is_ccw());
        assert_relative_eq!(mirrored.area(), contour.area());

        let bounds = mirrored.bounds().unwrap();
        assert_relative_eq!(bounds.0.x, -4.0);
        assert_relative_eq!(bounds.1.x, -2.0);
    }

    #[test]
    fn rotation_preserves_area() {
        let contour = Contour::from_points(square(2.0, DVec2::new(1.0, 1.0)).points().to_vec())
            .unwrap()
            .rotated(std::f64::consts::FRAC_PI_4);
        assert_relative_eq!(contour.area(), 4.0, epsilon = 1e-12);
    }
}
