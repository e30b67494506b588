//! Quickhull in three dimensions, after Barber, Dobkin and Huhdanpaa.
//!
//! A tetrahedron over the extreme points seeds the hull. Every point
//! left over is claimed by one face that can see it. Each pass then
//! lifts the farthest claimed point onto the hull by deleting the
//! faces it sees and re-facing the horizon ring to it, until no face
//! has claimed points left.

use std::collections::HashMap;

use config::constants::{EPSILON_TOLERANCE, WELD_EPSILON};
use glam::DVec3;
use kerf_geom::{GeomError, Mesh, MeshBuilder};

/// Convex hull of a spatial point cloud as a closed mesh with
/// outward-facing normals.
pub(crate) fn convex_hull(points: &[DVec3]) -> Result<Mesh, GeomError> {
    let points = dedup(points);
    if points.len() < 4 {
        return Err(GeomError::degenerate(
            "hull needs at least four distinct points",
        ));
    }

    let mut faces = initial_tetrahedron(&points)?;
    expand(&mut faces, &points);

    let mut builder = MeshBuilder::new();
    for face in &faces {
        let [a, b, c] = face.corners;
        builder.add_triangle_points([points[a], points[b], points[c]]);
    }
    Ok(builder.build())
}

/// One triangular face of the hull under construction.
#[derive(Debug, Clone)]
struct HullFace {
    corners: [usize; 3],
    normal: DVec3,
    offset: f64,
    /// Points claimed by this face, strictly in front of its plane.
    outside: Vec<usize>,
}

impl HullFace {
    fn new(a: usize, b: usize, c: usize, points: &[DVec3]) -> Self {
        let normal = (points[b] - points[a])
            .cross(points[c] - points[a])
            .normalize_or_zero();
        Self {
            corners: [a, b, c],
            normal,
            offset: normal.dot(points[a]),
            outside: Vec::new(),
        }
    }

    /// Signed height of `point` over the face plane.
    fn height(&self, point: DVec3) -> f64 {
        self.normal.dot(point) - self.offset
    }

    fn sees(&self, point: DVec3) -> bool {
        self.height(point) > EPSILON_TOLERANCE
    }
}

/// Collapses points closer than the weld tolerance.
fn dedup(points: &[DVec3]) -> Vec<DVec3> {
    let mut unique: Vec<DVec3> = Vec::with_capacity(points.len());
    for &point in points {
        let seen = unique
            .iter()
            .any(|kept| kept.distance_squared(point) < WELD_EPSILON * WELD_EPSILON);
        if !seen {
            unique.push(point);
        }
    }
    unique
}

/// Seed tetrahedron spanning the axis extremes, faces wound outward.
fn initial_tetrahedron(points: &[DVec3]) -> Result<Vec<HullFace>, GeomError> {
    let mut extremes = [0usize; 6];
    for (index, point) in points.iter().enumerate() {
        if point.x < points[extremes[0]].x {
            extremes[0] = index;
        }
        if point.x > points[extremes[1]].x {
            extremes[1] = index;
        }
        if point.y < points[extremes[2]].y {
            extremes[2] = index;
        }
        if point.y > points[extremes[3]].y {
            extremes[3] = index;
        }
        if point.z < points[extremes[4]].z {
            extremes[4] = index;
        }
        if point.z > points[extremes[5]].z {
            extremes[5] = index;
        }
    }

    let (a, b) = farthest_pair(&extremes, points);
    let c = farthest_from_line(a, b, points)?;
    let d = farthest_from_plane(a, b, c, points)?;

    let interior = (points[a] + points[b] + points[c] + points[d]) / 4.0;
    let mut faces = vec![
        face_away_from(a, b, c, interior, points),
        face_away_from(a, c, d, interior, points),
        face_away_from(a, d, b, interior, points),
        face_away_from(b, d, c, interior, points),
    ];

    for index in 0..points.len() {
        if index != a && index != b && index != c && index != d {
            claim(index, &mut faces, points);
        }
    }
    Ok(faces)
}

fn farthest_pair(candidates: &[usize; 6], points: &[DVec3]) -> (usize, usize) {
    let mut best = (candidates[0], candidates[1]);
    let mut best_distance = 0.0;
    for (slot, &a) in candidates.iter().enumerate() {
        for &b in candidates.iter().skip(slot + 1) {
            let distance = points[a].distance_squared(points[b]);
            if distance > best_distance {
                best_distance = distance;
                best = (a, b);
            }
        }
    }
    best
}

fn farthest_from_line(a: usize, b: usize, points: &[DVec3]) -> Result<usize, GeomError> {
    let Some(direction) = (points[b] - points[a]).try_normalize() else {
        return Err(GeomError::degenerate("hull points coincide"));
    };
    let mut best = None;
    let mut best_distance = EPSILON_TOLERANCE;
    for (index, point) in points.iter().enumerate() {
        if index == a || index == b {
            continue;
        }
        let arm = *point - points[a];
        let distance = (arm - arm.dot(direction) * direction).length();
        if distance > best_distance {
            best_distance = distance;
            best = Some(index);
        }
    }
    best.ok_or_else(|| GeomError::degenerate("hull points are collinear"))
}

fn farthest_from_plane(
    a: usize,
    b: usize,
    c: usize,
    points: &[DVec3],
) -> Result<usize, GeomError> {
    let Some(normal) = (points[b] - points[a])
        .cross(points[c] - points[a])
        .try_normalize()
    else {
        return Err(GeomError::degenerate("hull points are collinear"));
    };
    let mut best = None;
    let mut best_distance = EPSILON_TOLERANCE;
    for (index, point) in points.iter().enumerate() {
        if index == a || index == b || index == c {
            continue;
        }
        let distance = normal.dot(*point - points[a]).abs();
        if distance > best_distance {
            best_distance = distance;
            best = Some(index);
        }
    }
    best.ok_or_else(|| GeomError::degenerate("hull points are coplanar"))
}

/// Builds the face `(a, b, c)`, flipped if its normal faces `interior`.
fn face_away_from(
    a: usize,
    b: usize,
    c: usize,
    interior: DVec3,
    points: &[DVec3],
) -> HullFace {
    let face = HullFace::new(a, b, c, points);
    let centre = (points[a] + points[b] + points[c]) / 3.0;
    if face.normal.dot(interior - centre) > 0.0 {
        HullFace::new(a, c, b, points)
    } else {
        face
    }
}

/// Hands `index` to the first face that sees it. Points inside every
/// face are on or under the hull and stay unclaimed.
fn claim(index: usize, faces: &mut [HullFace], points: &[DVec3]) {
    let point = points[index];
    for face in faces.iter_mut() {
        if face.sees(point) {
            face.outside.push(index);
            return;
        }
    }
}

fn expand(faces: &mut Vec<HullFace>, points: &[DVec3]) {
    // Each pass consumes one farthest point, so the point count bounds
    // the pass count.
    for _ in 0..points.len() * 2 {
        let Some(open) = faces.iter().position(|face| !face.outside.is_empty()) else {
            break;
        };
        let Some(apex) = farthest_outside(&faces[open], points) else {
            faces[open].outside.clear();
            continue;
        };

        let visible: Vec<usize> = faces
            .iter()
            .enumerate()
            .filter(|(_, face)| face.sees(points[apex]))
            .map(|(index, _)| index)
            .collect();
        if visible.is_empty() {
            faces[open].outside.retain(|&candidate| candidate != apex);
            continue;
        }

        let horizon = horizon_edges(faces, &visible);

        let mut orphans: Vec<usize> = Vec::new();
        for &index in &visible {
            orphans.extend(&faces[index].outside);
        }
        orphans.retain(|&candidate| candidate != apex);

        // Reverse order keeps the remaining indices valid.
        let mut doomed = visible;
        doomed.sort_unstable_by(|a, b| b.cmp(a));
        for index in doomed {
            faces.swap_remove(index);
        }

        // Horizon edges keep the winding of the faces they came from,
        // so `(from, to, apex)` winds outward without a flip test.
        for (from, to) in horizon {
            faces.push(HullFace::new(from, to, apex, points));
        }

        for orphan in orphans {
            claim(orphan, faces, points);
        }
    }
}

fn farthest_outside(face: &HullFace, points: &[DVec3]) -> Option<usize> {
    face.outside
        .iter()
        .max_by(|&&a, &&b| face.height(points[a]).total_cmp(&face.height(points[b])))
        .copied()
}

/// Directed boundary of the visible patch.
///
/// An edge shared by two visible faces is interior to the patch; an
/// edge counted once borders a face that survives.
fn horizon_edges(faces: &[HullFace], visible: &[usize]) -> Vec<(usize, usize)> {
    let mut counts: HashMap<(usize, usize), usize> = HashMap::new();
    for &index in visible {
        for (from, to) in directed_edges(&faces[index]) {
            let key = if from < to { (from, to) } else { (to, from) };
            *counts.entry(key).or_insert(0) += 1;
        }
    }

    let mut horizon = Vec::new();
    for &index in visible {
        for (from, to) in directed_edges(&faces[index]) {
            let key = if from < to { (from, to) } else { (to, from) };
            if counts[&key] == 1 {
                horizon.push((from, to));
            }
        }
    }
    horizon
}

fn directed_edges(face: &HullFace) -> [(usize, usize); 3] {
    let [a, b, c] = face.corners;
    [(a, b), (b, c), (c, a)]
}
