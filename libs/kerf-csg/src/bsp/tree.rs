//! The BSP tree itself.
//!
//! Nodes live in one arena and link by index, so building and clipping
//! deep trees never recurses on the call stack.

use super::facet::Facet;
use super::plane::Plane;

/// A solid represented as facets sorted into half-space nodes.
#[derive(Debug, Default)]
pub(crate) struct Tree {
    nodes: Vec<Node>,
}

#[derive(Debug, Default)]
struct Node {
    plane: Option<Plane>,
    facets: Vec<Facet>,
    front: Option<usize>,
    back: Option<usize>,
}

impl Tree {
    pub fn build(facets: Vec<Facet>) -> Self {
        let mut tree = Self {
            nodes: vec![Node::default()],
        };
        tree.insert(facets);
        tree
    }

    /// Adds more facets, splitting them down to the leaves. Each node
    /// takes its plane from the first facet that reaches it.
    pub fn insert(&mut self, facets: Vec<Facet>) {
        let mut pending = vec![(0usize, facets)];
        while let Some((index, facets)) = pending.pop() {
            if facets.is_empty() {
                continue;
            }
            let plane = match self.nodes[index].plane {
                Some(plane) => plane,
                None => {
                    let plane = *facets[0].plane();
                    self.nodes[index].plane = Some(plane);
                    plane
                }
            };

            let mut keep = Vec::new();
            let mut keep_back = Vec::new();
            let mut front = Vec::new();
            let mut back = Vec::new();
            for facet in &facets {
                facet.split(&plane, &mut keep, &mut keep_back, &mut front, &mut back);
            }
            // Coplanar facets of either direction live on this node.
            keep.append(&mut keep_back);
            self.nodes[index].facets.extend(keep);

            if !front.is_empty() {
                let child = self.ensure_front(index);
                pending.push((child, front));
            }
            if !back.is_empty() {
                let child = self.ensure_back(index);
                pending.push((child, back));
            }
        }
    }

    /// Converts the tree to its complement solid in place.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for facet in &mut node.facets {
                facet.flip();
            }
            if let Some(plane) = &mut node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Returns the parts of `facets` outside the solid this tree bounds.
    pub fn clip_facets(&self, facets: Vec<Facet>) -> Vec<Facet> {
        if self.nodes[0].plane.is_none() {
            return facets;
        }
        let mut outside = Vec::new();
        let mut pending = vec![(0usize, facets)];
        while let Some((index, facets)) = pending.pop() {
            let node = &self.nodes[index];
            let Some(plane) = node.plane else {
                outside.extend(facets);
                continue;
            };

            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut front = Vec::new();
            let mut back = Vec::new();
            for facet in &facets {
                facet.split(
                    &plane,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
            }
            front.append(&mut coplanar_front);
            back.append(&mut coplanar_back);

            match node.front {
                Some(child) => pending.push((child, front)),
                None => outside.extend(front),
            }
            // No back child: back facets are inside the solid and vanish.
            if let Some(child) = node.back {
                pending.push((child, back));
            }
        }
        outside
    }

    /// Removes every part of this tree's facets inside `other`.
    pub fn clip_to(&mut self, other: &Tree) {
        for index in 0..self.nodes.len() {
            let facets = std::mem::take(&mut self.nodes[index].facets);
            self.nodes[index].facets = other.clip_facets(facets);
        }
    }

    /// Every facet stored anywhere in the tree.
    pub fn all_facets(&self) -> Vec<Facet> {
        self.nodes
            .iter()
            .flat_map(|node| node.facets.iter().cloned())
            .collect()
    }

    fn ensure_front(&mut self, index: usize) -> usize {
        if let Some(child) = self.nodes[index].front {
            return child;
        }
        let child = self.push_node();
        self.nodes[index].front = Some(child);
        child
    }

    fn ensure_back(&mut self, index: usize) -> usize {
        if let Some(child) = self.nodes[index].back {
            return child;
        }
        let child = self.push_node();
        self.nodes[index].back = Some(child);
        child
    }

    fn push_node(&mut self) -> usize {
        self.nodes.push(Node::default());
        self.nodes.len() - 1
    }

    #[cfg(test)]
    pub fn facet_count(&self) -> usize {
        self.nodes.iter().map(|node| node.facets.len()).sum()
    }
}
