//! # BSP Backend
//!
//! The stock 3D backend. Booleans follow the csg.js approach by Evan
//! Wallace: each operand becomes a BSP tree, the trees clip each other
//! until only boundary facets of the result survive, and those facets
//! are fan-triangulated back into a welded mesh.
//!
//! - union: `A.clip_to(B); B.clip_to(A); B.invert(); B.clip_to(A); B.invert(); merge`
//! - subtract: `A.invert(); A.clip_to(B); B.clip_to(A); B.invert(); B.clip_to(A); B.invert(); merge; invert`
//! - intersect: `A.invert(); B.clip_to(A); B.invert(); A.clip_to(B); B.clip_to(A); merge; invert`
//!
//! Hull runs quickhull over every operand vertex instead of clipping.

mod facet;
mod plane;
mod tree;

#[cfg(test)]
mod tests;

use glam::DVec3;
use kerf_geom::{Mesh, MeshBuilder};
use tracing::debug;

use crate::error::CsgError;
use crate::hull;
use crate::traits::{require_operands, SolidBoolean};

use facet::Facet;
use tree::Tree;

/// The stock 3D backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct BspBackend;

impl BspBackend {
    /// Creates the backend. Stateless.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SolidBoolean for BspBackend {
    fn name(&self) -> &'static str {
        "bsp"
    }

    fn union(&self, operands: &[Mesh]) -> Result<Mesh, CsgError> {
        debug!(operands = operands.len(), "bsp union");
        let (first, rest) = require_operands("union", operands)?;
        let mut merged = first.clone();
        for operand in rest {
            merged = union_pair(&merged, operand);
        }
        Ok(merged)
    }

    fn intersect(&self, operands: &[Mesh]) -> Result<Mesh, CsgError> {
        debug!(operands = operands.len(), "bsp intersect");
        let (first, rest) = require_operands("intersect", operands)?;
        let mut merged = first.clone();
        for operand in rest {
            merged = intersect_pair(&merged, operand);
        }
        Ok(merged)
    }

    fn subtract(&self, base: &Mesh, tool: &Mesh) -> Result<Mesh, CsgError> {
        debug!("bsp subtract");
        Ok(subtract_pair(base, tool))
    }

    fn hull(&self, operands: &[Mesh]) -> Result<Mesh, CsgError> {
        debug!(operands = operands.len(), "bsp hull");
        if operands.is_empty() {
            return Err(CsgError::EmptyOperands { operation: "hull" });
        }
        let points: Vec<DVec3> = operands
            .iter()
            .flat_map(Mesh::vertices)
            .copied()
            .collect();
        Ok(hull::convex_hull(&points)?)
    }
}

fn union_pair(a: &Mesh, b: &Mesh) -> Mesh {
    if a.is_empty() {
        return b.clone();
    }
    if b.is_empty() {
        return a.clone();
    }
    let mut tree_a = Tree::build(facets_of(a));
    let mut tree_b = Tree::build(facets_of(b));

    // Drop the part of each solid inside the other, then the faces of
    // b coplanar with remaining faces of a.
    tree_a.clip_to(&tree_b);
    tree_b.clip_to(&tree_a);
    tree_b.invert();
    tree_b.clip_to(&tree_a);
    tree_b.invert();

    let mut facets = tree_a.all_facets();
    facets.extend(tree_b.all_facets());
    mesh_of(&facets)
}

fn subtract_pair(base: &Mesh, tool: &Mesh) -> Mesh {
    if base.is_empty() || tool.is_empty() {
        return base.clone();
    }
    let mut tree_a = Tree::build(facets_of(base));
    let mut tree_b = Tree::build(facets_of(tool));

    // A - B as ~(~A | B).
    tree_a.invert();
    tree_a.clip_to(&tree_b);
    tree_b.clip_to(&tree_a);
    tree_b.invert();
    tree_b.clip_to(&tree_a);
    tree_b.invert();

    let mut facets = tree_a.all_facets();
    facets.extend(tree_b.all_facets());
    let mut merged = Tree::build(facets);
    merged.invert();
    mesh_of(&merged.all_facets())
}

fn intersect_pair(a: &Mesh, b: &Mesh) -> Mesh {
    if a.is_empty() || b.is_empty() {
        return Mesh::empty();
    }
    let mut tree_a = Tree::build(facets_of(a));
    let mut tree_b = Tree::build(facets_of(b));

    // A & B as ~(~A | ~B).
    tree_a.invert();
    tree_b.clip_to(&tree_a);
    tree_b.invert();
    tree_a.clip_to(&tree_b);
    tree_b.clip_to(&tree_a);

    let mut facets = tree_a.all_facets();
    facets.extend(tree_b.all_facets());
    let mut merged = Tree::build(facets);
    merged.invert();
    mesh_of(&merged.all_facets())
}

/// Every triangle of the mesh as a facet. Degenerate faces drop out.
fn facets_of(mesh: &Mesh) -> Vec<Facet> {
    let vertices = mesh.vertices();
    mesh.faces()
        .iter()
        .filter_map(|&[a, b, c]| {
            Facet::new(vec![
                vertices[a as usize],
                vertices[b as usize],
                vertices[c as usize],
            ])
        })
        .collect()
}

/// Fan-triangulates each facet and welds the soup into a mesh.
fn mesh_of(facets: &[Facet]) -> Mesh {
    let mut builder = MeshBuilder::new();
    for facet in facets {
        let ring = facet.vertices();
        for index in 1..ring.len() - 1 {
            builder.add_triangle_points([ring[0], ring[index], ring[index + 1]]);
        }
    }
    builder.build()
}
