//! Nearest-edge projection used to snap a marker onto selected geometry.

use crate::geometry::{LineF, Path, Point};
use crate::items::GraphicsItem;

/// Projection of a point onto the interior of one path edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeProjection {
    /// Perpendicular distance from the point to the edge.
    pub distance: f64,
    /// Foot of the perpendicular on the edge.
    pub foot: Point,
    /// Normal-vector angle of the reversed edge, in degrees.
    pub angle: f64,
}

/// Projects `pos` onto the edge `a -> b`.
///
/// Returns `None` for zero-length edges and when the foot would fall outside
/// the segment (either endpoint at least as far from `pos` as the edge is
/// long). The altitude comes from Heron's formula over the triangle
/// `pos, a, b`; rounding can push the radicand slightly negative, which is
/// clamped to zero.
pub fn project_onto_edge(pos: Point, a: Point, b: Point) -> Option<EdgeProjection> {
    let l1 = pos.distance_to(&a);
    let l2 = pos.distance_to(&b);
    let l3 = a.distance_to(&b);
    if l3 <= f64::EPSILON || !(l1 < l3 && l2 < l3) {
        return None;
    }

    let p = (l1 + l2 + l3) / 2.0;
    let area = (p * (p - l1) * (p - l2) * (p - l3)).max(0.0).sqrt();
    let h = 2.0 / l3 * area;

    let along = (l1 * l1 - h * h).max(0.0).sqrt();
    let foot = LineF::new(a, b).with_length(along).p2;
    let angle = LineF::new(b, a).normal_vector().angle();

    Some(EdgeProjection {
        distance: h,
        foot,
        angle,
    })
}

/// Closest projection of `pos` over every edge of a closed path.
///
/// Ties keep the earliest edge.
pub fn nearest_on_path(pos: Point, path: &Path) -> Option<EdgeProjection> {
    let n = path.len();
    let mut best: Option<EdgeProjection> = None;
    for i in 0..n {
        let a = path[i].to_point();
        let b = path[(i + 1) % n].to_point();
        if let Some(candidate) = project_onto_edge(pos, a, b) {
            if best.map_or(true, |b| candidate.distance < b.distance) {
                best = Some(candidate);
            }
        }
    }
    best
}

/// Closest projection over all selected path-carrying items.
pub fn nearest_on_items(pos: Point, items: &[&dyn GraphicsItem]) -> Option<EdgeProjection> {
    items
        .iter()
        .filter(|item| item.item_type().carries_paths() && item.is_selected())
        .flat_map(|item| item.paths().iter())
        .filter_map(|path| nearest_on_path(pos, path))
        .fold(None, |best: Option<EdgeProjection>, candidate| match best {
            Some(b) if b.distance <= candidate.distance => Some(b),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path_from_points;

    const EPS: f64 = 1e-6;

    fn square() -> Path {
        path_from_points(&[
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ])
    }

    #[test]
    fn test_projection_interior() {
        let proj = project_onto_edge(
            Point::new(5.0, 0.5),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        let proj = proj.unwrap();
        assert!((proj.distance - 0.5).abs() < EPS);
        assert!(proj.foot.distance_to(&Point::new(5.0, 0.0)) < EPS);
        assert!((proj.angle - 270.0).abs() < EPS);
    }

    #[test]
    fn test_projection_beyond_endpoint_rejected() {
        let proj = project_onto_edge(
            Point::new(12.0, 0.5),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        );
        assert!(proj.is_none());
    }

    #[test]
    fn test_degenerate_edge_rejected() {
        let a = Point::new(3.0, 3.0);
        assert!(project_onto_edge(Point::new(3.0, 4.0), a, a).is_none());
        assert!(project_onto_edge(a, a, a).is_none());
    }

    #[test]
    fn test_point_on_edge_has_zero_distance() {
        let proj = project_onto_edge(
            Point::new(4.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        )
        .unwrap();
        assert!(proj.distance.abs() < EPS);
        assert!(!proj.foot.x.is_nan());
        assert!(proj.foot.distance_to(&Point::new(4.0, 0.0)) < EPS);
    }

    #[test]
    fn test_nearest_on_closed_path_uses_closing_edge() {
        // Closest edge is (0,10) -> (0,0), the one that wraps around.
        let proj = nearest_on_path(Point::new(0.3, 5.0), &square()).unwrap();
        assert!(proj.foot.distance_to(&Point::new(0.0, 5.0)) < EPS);
        assert!((proj.distance - 0.3).abs() < EPS);
    }

    #[test]
    fn test_nearest_on_path_with_duplicate_vertices() {
        let path = path_from_points(&[
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
        ]);
        let proj = nearest_on_path(Point::new(5.0, 0.2), &path).unwrap();
        assert!(proj.foot.distance_to(&Point::new(5.0, 0.0)) < EPS);
    }
}
