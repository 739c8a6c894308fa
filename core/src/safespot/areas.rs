//! Outlines of same-class tile regions.
//!
//! The renderer projects each tile to a screen quad. Edges shared by two
//! tiles of the same class are interior and dropped; what remains is the
//! region outline. Projection jitter is absorbed by a tolerance scaled to the
//! average edge length.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::world::Tile;

/// Classes above this are fully exposed and never outlined
pub const MAX_OUTLINED_CLASS: u8 = 6;

pub type ScreenPoint = (i32, i32);

/// A projected tile: four corners in drawing order
pub type Quad = [ScreenPoint; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: ScreenPoint,
    pub to: ScreenPoint,
}

fn squared_distance(a: ScreenPoint, b: ScreenPoint) -> i64 {
    let dx = i64::from(a.0 - b.0);
    let dy = i64::from(a.1 - b.1);
    dx * dx + dy * dy
}

impl Edge {
    fn squared_length(&self) -> i64 {
        squared_distance(self.from, self.to)
    }

    /// Same boundary in either direction, within `tolerance` squared pixels
    fn matches(&self, other: &Edge, tolerance: i64) -> bool {
        let close = |a, b| squared_distance(a, b) <= tolerance;
        (close(self.from, other.from) && close(self.to, other.to))
            || (close(self.from, other.to) && close(self.to, other.from))
    }
}

/// Squared-distance tolerance: ceil(mean squared edge length / 6)
pub fn edge_tolerance(edges: &[Edge]) -> i64 {
    if edges.is_empty() {
        return 0;
    }
    let mean = edges.iter().map(Edge::squared_length).sum::<i64>() / edges.len() as i64;
    (mean + 5) / 6
}

/// Boundary edges of a set of quads of one class
pub fn outline_edges(quads: &[Quad]) -> Vec<Edge> {
    let edges: Vec<Edge> = quads
        .iter()
        .flat_map(|quad| {
            (0..4).map(move |i| Edge {
                from: quad[i],
                to: quad[(i + 1) % 4],
            })
        })
        .collect();
    let tolerance = edge_tolerance(&edges);

    edges
        .iter()
        .enumerate()
        .filter(|&(i, edge)| {
            !edges
                .iter()
                .enumerate()
                .any(|(j, other)| i != j && edge.matches(other, tolerance))
        })
        .map(|(_, edge)| *edge)
        .collect()
}

/// Outline every class group, projecting tiles with `project`. Tiles the
/// projection rejects (off screen) are skipped.
pub fn outline_classes<F>(groups: &BTreeMap<u8, Vec<Tile>>, project: F) -> BTreeMap<u8, Vec<Edge>>
where
    F: Fn(Tile) -> Option<Quad>,
{
    groups
        .iter()
        .filter(|&(&class, _)| class <= MAX_OUTLINED_CLASS)
        .map(|(&class, tiles)| {
            let quads: Vec<Quad> = tiles.iter().filter_map(|&tile| project(tile)).collect();
            (class, outline_edges(&quads))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: i32, y: i32) -> Quad {
        [(x, y), (x + 10, y), (x + 10, y + 10), (x, y + 10)]
    }

    #[test]
    fn test_shared_edge_is_interior() {
        let edges = outline_edges(&[square(0, 0), square(10, 0)]);
        assert_eq!(edges.len(), 6);
        assert!(!edges.iter().any(|e| e.from.0 == 10 && e.to.0 == 10));
    }

    #[test]
    fn test_jittered_shared_edge_still_matches() {
        let mut right = square(10, 0);
        right[0] = (11, 1);
        let edges = outline_edges(&[square(0, 0), right]);
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn test_tolerance_formula() {
        // mean squared length 100 -> ceil(100 / 6) = 17
        let edges: Vec<Edge> = outline_edges(&[square(0, 0)]);
        assert_eq!(edge_tolerance(&edges), 17);
    }

    #[test]
    fn test_fully_exposed_class_not_outlined() {
        let mut groups = BTreeMap::new();
        groups.insert(0u8, vec![Tile::new(0, 0)]);
        groups.insert(7u8, vec![Tile::new(1, 0)]);
        let outlines = outline_classes(&groups, |tile| Some(square(tile.x * 10, tile.y * 10)));
        assert!(outlines.contains_key(&0));
        assert!(!outlines.contains_key(&7));
        assert_eq!(outlines[&0].len(), 4);
    }
}
