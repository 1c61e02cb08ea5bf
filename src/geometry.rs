//! Geometric helpers for 3D collision detection and containment.
//!
//! All tests treat boxes as half-open intervals per axis: two boxes that only
//! share a face, an edge or a corner do not collide.

use crate::types::{EPSILON_GENERAL, Position};

/// Checks whether two positions intersect with positive volume.
///
/// Uses the separating axis test for axis-aligned boxes: the boxes do NOT
/// overlap as soon as they are separated along any single axis.
///
/// # Examples
/// ```
/// use stowage::geometry::overlaps;
/// use stowage::types::{Coordinates, Position};
///
/// let a = Position::new(Coordinates::new(0.0, 0.0, 0.0), Coordinates::new(10.0, 10.0, 10.0));
/// let b = Position::new(Coordinates::new(10.0, 0.0, 0.0), Coordinates::new(20.0, 10.0, 10.0));
/// assert!(!overlaps(&a, &b));
/// ```
pub fn overlaps(a: &Position, b: &Position) -> bool {
    !(a.end.width <= b.start.width
        || a.start.width >= b.end.width
        || a.end.depth <= b.start.depth
        || a.start.depth >= b.end.depth
        || a.end.height <= b.start.height
        || a.start.height >= b.end.height)
}

/// Checks whether the width/depth footprints of two positions intersect.
///
/// Same half-open test as [`overlaps`], restricted to the horizontal axes.
pub fn footprints_overlap(a: &Position, b: &Position) -> bool {
    !(a.end.width <= b.start.width
        || a.start.width >= b.end.width
        || a.end.depth <= b.start.depth
        || a.start.depth >= b.end.depth)
}

/// Checks whether `inner` is no larger than `outer` along every axis.
///
/// Only the extents are compared; offsets are ignored. See [`contains`] for the
/// positional check.
pub fn fits(inner: &Position, outer: &Position) -> bool {
    inner
        .extents()
        .fits_within(&outer.extents(), EPSILON_GENERAL)
}

/// Checks whether `inner` lies completely inside `outer`.
pub fn contains(outer: &Position, inner: &Position) -> bool {
    inner.start.width + EPSILON_GENERAL >= outer.start.width
        && inner.start.depth + EPSILON_GENERAL >= outer.start.depth
        && inner.start.height + EPSILON_GENERAL >= outer.start.height
        && inner.end.width <= outer.end.width + EPSILON_GENERAL
        && inner.end.depth <= outer.end.depth + EPSILON_GENERAL
        && inner.end.height <= outer.end.height + EPSILON_GENERAL
}

/// Volume of the region occupied by a position.
pub fn volume(position: &Position) -> f64 {
    position.extents().volume()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coordinates;

    fn boxed(start: (f64, f64, f64), end: (f64, f64, f64)) -> Position {
        Position::new(start.into(), end.into())
    }

    #[test]
    fn overlap_is_symmetric() {
        let cases = [
            (boxed((0.0, 0.0, 0.0), (10.0, 10.0, 10.0)), boxed((5.0, 5.0, 5.0), (15.0, 15.0, 15.0))),
            (boxed((0.0, 0.0, 0.0), (10.0, 10.0, 10.0)), boxed((10.0, 0.0, 0.0), (20.0, 10.0, 10.0))),
            (boxed((0.0, 0.0, 0.0), (1.0, 1.0, 1.0)), boxed((3.0, 3.0, 3.0), (4.0, 4.0, 4.0))),
            (boxed((0.0, 0.0, 0.0), (10.0, 10.0, 10.0)), boxed((2.0, 2.0, 2.0), (3.0, 3.0, 3.0))),
        ];
        for (a, b) in cases {
            assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
        }
    }

    #[test]
    fn box_overlaps_itself_unless_degenerate() {
        let solid = boxed((1.0, 1.0, 1.0), (2.0, 3.0, 4.0));
        assert!(overlaps(&solid, &solid));

        let flat = boxed((1.0, 1.0, 1.0), (2.0, 3.0, 1.0));
        assert!(!overlaps(&flat, &flat));
    }

    #[test]
    fn touching_faces_edges_and_corners_do_not_overlap() {
        let base = boxed((0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let face = boxed((0.0, 0.0, 10.0), (10.0, 10.0, 20.0));
        let edge = boxed((10.0, 10.0, 0.0), (20.0, 20.0, 10.0));
        let corner = boxed((10.0, 10.0, 10.0), (20.0, 20.0, 20.0));
        assert!(!overlaps(&base, &face));
        assert!(!overlaps(&base, &edge));
        assert!(!overlaps(&base, &corner));
    }

    #[test]
    fn contained_box_overlaps() {
        let outer = boxed((0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let inner = boxed((4.0, 4.0, 4.0), (6.0, 6.0, 6.0));
        assert!(overlaps(&outer, &inner));
    }

    #[test]
    fn footprint_ignores_height() {
        let low = boxed((0.0, 0.0, 0.0), (10.0, 10.0, 10.0));
        let high = boxed((5.0, 5.0, 50.0), (15.0, 15.0, 60.0));
        assert!(footprints_overlap(&low, &high));
        assert!(!overlaps(&low, &high));

        let beside = boxed((10.0, 0.0, 50.0), (20.0, 10.0, 60.0));
        assert!(!footprints_overlap(&low, &beside));
    }

    #[test]
    fn fits_compares_extents_only() {
        let container = Position::from_origin(Coordinates::new(10.0, 10.0, 10.0));
        let shifted = boxed((50.0, 50.0, 50.0), (60.0, 60.0, 60.0));
        assert!(fits(&shifted, &container));
        assert!(!contains(&container, &shifted));

        let too_wide = boxed((0.0, 0.0, 0.0), (11.0, 5.0, 5.0));
        assert!(!fits(&too_wide, &container));
    }

    #[test]
    fn contains_accepts_exact_boundaries() {
        let container = Position::from_origin(Coordinates::new(10.0, 10.0, 10.0));
        let flush = boxed((5.0, 5.0, 5.0), (10.0, 10.0, 10.0));
        assert!(contains(&container, &flush));

        let negative = boxed((-1.0, 0.0, 0.0), (2.0, 2.0, 2.0));
        assert!(!contains(&container, &negative));
    }

    #[test]
    fn volume_is_product_of_extents() {
        let pos = boxed((1.0, 1.0, 1.0), (3.0, 4.0, 5.0));
        assert_eq!(volume(&pos), 24.0);
    }
}
