//! Convex facets, the polygons BSP trees store and split.

use glam::DVec3;

use super::plane::{Classification, Plane};

/// A planar convex polygon with at least three vertices.
#[derive(Debug, Clone)]
pub(crate) struct Facet {
    vertices: Vec<DVec3>,
    plane: Plane,
}

impl Facet {
    /// Builds a facet, `None` when the vertices define no plane.
    pub fn new(vertices: Vec<DVec3>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        Some(Self { vertices, plane })
    }

    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    /// Reverses the winding so the facet bounds the complement solid.
    pub fn flip(&mut self) {
        self.vertices.reverse();
        self.plane.flip();
    }

    fn classify(&self, plane: &Plane) -> Classification {
        let mut in_front = false;
        let mut behind = false;
        for &vertex in &self.vertices {
            match plane.classify_point(vertex) {
                Classification::Front => in_front = true,
                Classification::Back => behind = true,
                Classification::Coplanar | Classification::Spanning => {}
            }
        }
        match (in_front, behind) {
            (true, true) => Classification::Spanning,
            (true, false) => Classification::Front,
            (false, true) => Classification::Back,
            (false, false) => Classification::Coplanar,
        }
    }

    /// Splits the facet by `plane` into the four output buckets.
    ///
    /// Coplanar facets go front or back by normal agreement. Spanning
    /// facets are cut along the plane; coplanar vertices of the cut
    /// ring belong to both halves.
    pub fn split(
        &self,
        plane: &Plane,
        coplanar_front: &mut Vec<Facet>,
        coplanar_back: &mut Vec<Facet>,
        front: &mut Vec<Facet>,
        back: &mut Vec<Facet>,
    ) {
        match self.classify(plane) {
            Classification::Coplanar => {
                if self.plane.normal().dot(plane.normal()) > 0.0 {
                    coplanar_front.push(self.clone());
                } else {
                    coplanar_back.push(self.clone());
                }
            }
            Classification::Front => front.push(self.clone()),
            Classification::Back => back.push(self.clone()),
            Classification::Spanning => {
                let mut front_ring = Vec::with_capacity(self.vertices.len() + 1);
                let mut back_ring = Vec::with_capacity(self.vertices.len() + 1);
                for (index, &vertex) in self.vertices.iter().enumerate() {
                    let next = self.vertices[(index + 1) % self.vertices.len()];
                    let side = plane.classify_point(vertex);
                    if side != Classification::Back {
                        front_ring.push(vertex);
                    }
                    if side != Classification::Front {
                        back_ring.push(vertex);
                    }
                    let crossing = matches!(
                        (side, plane.classify_point(next)),
                        (Classification::Front, Classification::Back)
                            | (Classification::Back, Classification::Front)
                    );
                    if crossing {
                        let here = plane.signed_distance(vertex);
                        let there = plane.signed_distance(next);
                        let cut = vertex.lerp(next, here / (here - there));
                        front_ring.push(cut);
                        back_ring.push(cut);
                    }
                }
                // A cut half can collapse below three vertices.
                front.extend(Self::new(front_ring));
                back.extend(Self::new(back_ring));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Facet {
        Facet::new(vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(2.0, 0.0, 0.0),
            DVec3::new(0.0, 2.0, 0.0),
        ])
        .unwrap()
    }

    #[test]
    fn degenerate_vertex_lists_make_no_facet() {
        assert!(Facet::new(vec![DVec3::ZERO, DVec3::X]).is_none());
        assert!(Facet::new(vec![DVec3::ZERO, DVec3::X, DVec3::X * 2.0]).is_none());
    }

    #[test]
    fn flip_reverses_winding_and_plane() {
        let mut facet = triangle();
        assert_eq!(facet.plane().normal(), DVec3::Z);

        facet.flip();
        assert_eq!(facet.plane().normal(), -DVec3::Z);
        assert_eq!(facet.vertices()[0], DVec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn whole_side_facets_classify_cleanly() {
        let plane = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
        let above = Facet::new(vec![
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::new(1.0, 0.0, 1.0),
            DVec3::new(0.0, 1.0, 2.0),
        ])
        .unwrap();

        assert_eq!(above.classify(&plane), Classification::Front);
        assert_eq!(triangle().classify(&plane), Classification::Coplanar);
    }

    #[test]
    fn coplanar_facets_route_by_normal_agreement() {
        let plane = Plane::from_points(DVec3::ZERO, DVec3::X, DVec3::Y).unwrap();
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        triangle().split(&plane, &mut coplanar_front, &mut coplanar_back, &mut front, &mut back);
        let mut flipped = triangle();
        flipped.flip();
        flipped.split(&plane, &mut coplanar_front, &mut coplanar_back, &mut front, &mut back);

        assert_eq!(coplanar_front.len(), 1);
        assert_eq!(coplanar_back.len(), 1);
        assert!(front.is_empty() && back.is_empty());
    }

    #[test]
    fn spanning_split_cuts_along_the_plane() {
        // Vertical plane through x = 1.
        let plane = Plane::from_points(
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(1.0, 0.0, 1.0),
        )
        .unwrap();
        let mut coplanar_front = Vec::new();
        let mut coplanar_back = Vec::new();
        let mut front = Vec::new();
        let mut back = Vec::new();

        triangle().split(&plane, &mut coplanar_front, &mut coplanar_back, &mut front, &mut back);

        assert_eq!(front.len(), 1);
        assert_eq!(back.len(), 1);
        // The tip past the plane is a triangle, the base a quad.
        assert_eq!(front[0].vertices().len(), 3);
        assert_eq!(back[0].vertices().len(), 4);
        for facet in front.iter().chain(&back) {
            assert_eq!(facet.plane().normal(), DVec3::Z);
        }
        for vertex in front[0].vertices() {
            assert!(vertex.x >= 1.0 - 1e-12);
        }
    }
}
