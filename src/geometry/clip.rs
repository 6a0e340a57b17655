// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Clipping of polygon rings against a vertical window `[left, right]`.
//!
//! A ring is first re-rooted at its lower-left vertex, then clipped on the
//! left, then on the right. Crossing points are interpolated with truncation
//! toward zero so that emitted coordinates stay integral.

use log::trace;

use super::{GeometryError, Point, Rectangle};

/// Optional left and right vertical clip lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClipBounds {
    left: Option<i64>,
    right: Option<i64>,
}

impl ClipBounds {
    pub fn new(left: Option<i64>, right: Option<i64>) -> Result<Self, GeometryError> {
        if let (Some(left), Some(right)) = (left, right) {
            if left > right {
                return Err(GeometryError::InvertedBounds { left, right });
            }
        }
        Ok(Self { left, right })
    }

    pub const fn unbounded() -> Self {
        Self {
            left: None,
            right: None,
        }
    }

    pub fn left(&self) -> Option<i64> {
        self.left
    }

    pub fn right(&self) -> Option<i64> {
        self.right
    }

    pub fn is_unbounded(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Offset added to every surviving point after clipping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Shift {
    pub dx: i64,
    pub dy: i64,
}

impl Shift {
    pub const fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn apply(&self, point: Point) -> Result<Point, GeometryError> {
        match (point.x.checked_add(self.dx), point.y.checked_add(self.dy)) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(GeometryError::CoordinateOverflow { operation: "shift" }),
        }
    }
}

/// Which side of a clip line is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Drop points with `x < bound`.
    Left,
    /// Drop points with `x > bound`.
    Right,
}

impl Side {
    fn excludes(self, point: Point, bound: i64) -> bool {
        match self {
            Side::Left => point.x < bound,
            Side::Right => point.x > bound,
        }
    }
}

/// Rotate `points` so the ring starts at its lower-left vertex.
///
/// The scan starts from the first point and adopts every later point that
/// exceeds the current best on neither axis, so the last such point wins.
pub fn reorder(points: &[Point]) -> Result<Vec<Point>, GeometryError> {
    let mut best = *points.first().ok_or(GeometryError::EmptyRing)?;
    let mut start = 0;
    for (i, point) in points.iter().enumerate() {
        if point.x <= best.x && point.y <= best.y {
            best = *point;
            start = i;
        }
    }

    let mut ring = Vec::with_capacity(points.len());
    ring.extend_from_slice(&points[start..]);
    ring.extend_from_slice(&points[..start]);
    Ok(ring)
}

/// The point at `x` on the infinite line through `start` and `end`.
///
/// The interpolated y is truncated toward zero, not rounded. Differences are
/// taken in `f64` so that edges spanning the whole `i64` range do not
/// overflow.
pub fn point_on_line_at_x(start: Point, end: Point, x: i64) -> Result<Point, GeometryError> {
    if start.x == end.x {
        return Err(GeometryError::VerticalEdge { start, end, x });
    }
    let gradient = (end.y as f64 - start.y as f64) / (end.x as f64 - start.x as f64);
    let y = gradient * (x as f64 - start.x as f64) + start.y as f64;
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
    if !(y >= i64::MIN as f64 && y < i64::MAX as f64) {
        return Err(GeometryError::CoordinateOverflow {
            operation: "interpolation",
        });
    }
    Ok(Point::new(x, y as i64))
}

// A vertical edge cannot straddle a vertical clip line.
fn crossing(start: Point, end: Point, bound: i64) -> Option<Point> {
    match point_on_line_at_x(start, end, bound) {
        Ok(point) => Some(point),
        Err(e) => {
            trace!("[CLIP] no crossing: {e}");
            None
        }
    }
}

/// Clip `ring` against one vertical line. A missing bound returns the ring
/// unchanged.
pub fn clip_side(ring: &[Point], bound: Option<i64>, side: Side) -> Vec<Point> {
    let Some(bound) = bound else {
        return ring.to_vec();
    };

    let mut clipped = Vec::with_capacity(ring.len() + 2);
    let mut last: Option<Point> = None;
    let mut cut_last = false;

    for &point in ring {
        if side.excludes(point, bound) {
            // Leaving the window.
            if let (Some(prev), false) = (last, cut_last) {
                clipped.extend(crossing(prev, point, bound));
            }
            cut_last = true;
        } else {
            // Re-entering the window.
            if let (Some(prev), true) = (last, cut_last) {
                clipped.extend(crossing(prev, point, bound));
            }
            clipped.push(point);
            cut_last = false;
        }
        last = Some(point);
    }

    // The closing edge from the final point back to the first crosses the
    // line iff exactly one of the two was dropped. Both directions count:
    // first dropped with final kept, and first kept with final dropped.
    if let (Some(&first), Some(final_point)) = (ring.first(), last) {
        if side.excludes(first, bound) != cut_last {
            clipped.extend(crossing(final_point, first, bound));
        }
    }

    clipped
}

/// Re-root `ring` and clip it to `bounds`. An empty result means the polygon
/// lies entirely outside the window.
pub fn clip(ring: &[Point], bounds: ClipBounds) -> Vec<Point> {
    let Ok(rooted) = reorder(ring) else {
        return Vec::new();
    };

    let left = clip_side(&rooted, bounds.left(), Side::Left);
    if left.is_empty() {
        return left;
    }
    clip_side(&left, bounds.right(), Side::Right)
}

pub fn shift(ring: &[Point], by: Shift) -> Result<Vec<Point>, GeometryError> {
    ring.iter().map(|&point| by.apply(point)).collect()
}

pub fn clip_and_shift(
    ring: &[Point],
    bounds: ClipBounds,
    by: Shift,
) -> Result<Vec<Point>, GeometryError> {
    let clipped = clip(ring, bounds);
    if by.is_zero() {
        Ok(clipped)
    } else {
        shift(&clipped, by)
    }
}

/// Intersect a rectangle with the x-window. Returns `None` when nothing, or
/// only a zero-width sliver, remains. Without bounds the rectangle is
/// returned as given, even with a negative width.
pub fn clip_rectangle(
    rect: &Rectangle,
    bounds: ClipBounds,
) -> Result<Option<Rectangle>, GeometryError> {
    if bounds.is_unbounded() {
        return Ok(Some(*rect));
    }

    let x0 = rect.lower_left.x;
    let x1 = rect.upper_right()?.x;
    let (mut xl, mut xh) = (x0.min(x1), x0.max(x1));
    if let Some(left) = bounds.left() {
        xl = xl.max(left);
    }
    if let Some(right) = bounds.right() {
        xh = xh.min(right);
    }

    if xh < xl || (xh == xl && rect.width != 0) {
        return Ok(None);
    }
    let width = xh
        .checked_sub(xl)
        .ok_or(GeometryError::CoordinateOverflow {
            operation: "rectangle width",
        })?;
    Ok(Some(Rectangle::new(
        Point::new(xl, rect.lower_left.y),
        width,
        rect.height,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(i64, i64)]) -> Vec<Point> {
        points.iter().copied().map(Point::from).collect()
    }

    fn square() -> Vec<Point> {
        ring(&[(0, 0), (10, 0), (10, 10), (0, 10)])
    }

    fn is_rotation_of(a: &[Point], b: &[Point]) -> bool {
        if a.len() != b.len() {
            return false;
        }
        if a.is_empty() {
            return true;
        }
        (0..b.len()).any(|k| {
            let rotated: Vec<Point> = b[k..].iter().chain(&b[..k]).copied().collect();
            rotated == a
        })
    }

    #[test]
    fn test_reorder_starts_at_lower_left() {
        let points = ring(&[(10, 10), (0, 10), (0, 0), (10, 0)]);
        let rooted = reorder(&points).unwrap();
        assert_eq!(rooted, ring(&[(0, 0), (10, 0), (10, 10), (0, 10)]));
    }

    #[test]
    fn test_reorder_last_dominating_point_wins() {
        // (3, 3) beats (5, 5), then (1, 2) beats (3, 3); (0, 9) never qualifies.
        let points = ring(&[(5, 5), (3, 3), (0, 9), (1, 2), (4, 1)]);
        let rooted = reorder(&points).unwrap();
        assert_eq!(rooted[0], Point::new(1, 2));
        assert!(is_rotation_of(&rooted, &points));
    }

    #[test]
    fn test_reorder_is_rotation_and_idempotent() {
        let rings = [
            square(),
            ring(&[(7, 3), (2, 8), (-4, 1), (0, -6), (5, -2)]),
            ring(&[(1, 1)]),
            ring(&[(3, 0), (0, 3)]),
        ];
        for points in &rings {
            let once = reorder(points).unwrap();
            assert!(is_rotation_of(&once, points), "{points:?} -> {once:?}");
            assert_eq!(reorder(&once).unwrap(), once);
        }
    }

    #[test]
    fn test_reorder_empty_is_error() {
        assert_eq!(reorder(&[]), Err(GeometryError::EmptyRing));
    }

    #[test]
    fn test_point_on_line_at_x() {
        let p = point_on_line_at_x(Point::new(0, 0), Point::new(10, 10), 5).unwrap();
        assert_eq!(p, Point::new(5, 5));
    }

    #[test]
    fn test_point_on_line_truncates_toward_zero() {
        let up = point_on_line_at_x(Point::new(0, 0), Point::new(3, 1), 2).unwrap();
        assert_eq!(up, Point::new(2, 0));
        let down = point_on_line_at_x(Point::new(0, 0), Point::new(3, -1), 2).unwrap();
        assert_eq!(down, Point::new(2, 0));
        let steep = point_on_line_at_x(Point::new(0, 0), Point::new(3, -8), 2).unwrap();
        assert_eq!(steep, Point::new(2, -5));
    }

    #[test]
    fn test_point_on_line_extrapolates() {
        let p = point_on_line_at_x(Point::new(0, 0), Point::new(2, 4), 5).unwrap();
        assert_eq!(p, Point::new(5, 10));
    }

    #[test]
    fn test_point_on_vertical_line_is_error() {
        let err = point_on_line_at_x(Point::new(3, 0), Point::new(3, 9), 3).unwrap_err();
        assert!(matches!(err, GeometryError::VerticalEdge { x: 3, .. }));
    }

    #[test]
    fn test_clip_left_square() {
        let clipped = clip(&square(), ClipBounds::new(Some(5), None).unwrap());
        assert_eq!(clipped, ring(&[(5, 0), (10, 0), (10, 10), (5, 10)]));
    }

    #[test]
    fn test_clip_left_beyond_polygon_is_empty() {
        let clipped = clip(&square(), ClipBounds::new(Some(20), None).unwrap());
        assert!(clipped.is_empty());
    }

    #[test]
    fn test_clip_right_triangle() {
        let triangle = ring(&[(0, 0), (10, 0), (5, 10)]);
        let clipped = clip(&triangle, ClipBounds::new(None, Some(7)).unwrap());
        assert_eq!(clipped, ring(&[(0, 0), (7, 0), (7, 6), (5, 10)]));
        assert_eq!(clipped.iter().filter(|p| p.x == 7).count(), 2);
    }

    #[test]
    fn test_clip_both_sides() {
        let clipped = clip(&square(), ClipBounds::new(Some(2), Some(8)).unwrap());
        assert_eq!(clipped, ring(&[(2, 0), (8, 0), (8, 10), (2, 10)]));
    }

    #[test]
    fn test_clip_unbounded_matches_reorder() {
        let points = ring(&[(10, 10), (0, 10), (0, 0), (10, 0)]);
        assert_eq!(
            clip(&points, ClipBounds::unbounded()),
            reorder(&points).unwrap()
        );
    }

    #[test]
    fn test_clip_right_of_everything_is_empty() {
        let clipped = clip(&square(), ClipBounds::new(None, Some(-1)).unwrap());
        assert!(clipped.is_empty());
    }

    #[test]
    fn test_wrap_around_first_dropped_last_kept() {
        let points = ring(&[(0, 0), (10, 0), (10, 10), (8, 10)]);
        let clipped = clip_side(&points, Some(5), Side::Left);
        assert_eq!(
            clipped,
            ring(&[(5, 0), (10, 0), (10, 10), (8, 10), (5, 6)])
        );
    }

    #[test]
    fn test_wrap_around_first_kept_last_dropped() {
        let points = ring(&[(0, 0), (0, 10), (10, 10), (10, 5)]);
        let clipped = clip(&points, ClipBounds::new(None, Some(7)).unwrap());
        assert_eq!(clipped, ring(&[(0, 0), (0, 10), (7, 10), (7, 3)]));
    }

    #[test]
    fn test_new_points_lie_on_bounds() {
        let points = ring(&[(-3, -2), (14, 1), (9, 12), (2, 7), (-6, 9)]);
        let bounds = ClipBounds::new(Some(0), Some(10)).unwrap();
        for point in clip(&points, bounds) {
            assert!(
                points.contains(&point) || point.x == 0 || point.x == 10,
                "unexpected {point}"
            );
            assert!((0..=10).contains(&point.x));
        }
    }

    #[test]
    fn test_degenerate_rings() {
        assert!(clip(&[], ClipBounds::new(Some(0), None).unwrap()).is_empty());
        let single = ring(&[(4, 4)]);
        assert_eq!(clip(&single, ClipBounds::unbounded()), single);
        assert!(clip(&single, ClipBounds::new(Some(5), None).unwrap()).is_empty());
    }

    #[test]
    fn test_shift_after_clip() {
        let bounds = ClipBounds::new(Some(5), None).unwrap();
        let by = Shift::new(100, -20);
        assert_eq!(
            clip_and_shift(&square(), bounds, by),
            shift(&clip(&square(), bounds), by)
        );
        assert_eq!(
            clip_and_shift(&square(), bounds, by).unwrap(),
            ring(&[(105, -20), (110, -20), (110, -10), (105, -10)])
        );
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        assert_eq!(
            ClipBounds::new(Some(10), Some(5)),
            Err(GeometryError::InvertedBounds { left: 10, right: 5 })
        );
        assert!(ClipBounds::new(Some(5), Some(5)).is_ok());
    }

    #[test]
    fn test_clip_rectangle() {
        let rect = Rectangle::new(Point::new(0, 0), 10, 4);
        let bounds = ClipBounds::new(Some(3), Some(8)).unwrap();
        assert_eq!(
            clip_rectangle(&rect, bounds).unwrap(),
            Some(Rectangle::new(Point::new(3, 0), 5, 4))
        );
        assert_eq!(
            clip_rectangle(&rect, ClipBounds::new(Some(10), None).unwrap()).unwrap(),
            None
        );
        assert_eq!(
            clip_rectangle(&rect, ClipBounds::unbounded()).unwrap(),
            Some(rect)
        );
    }

    #[test]
    fn test_clip_rectangle_negative_width() {
        // Spans x = 5..10 when read with its negative width.
        let rect = Rectangle::new(Point::new(10, 0), -5, 5);
        assert_eq!(
            clip_rectangle(&rect, ClipBounds::unbounded()).unwrap(),
            Some(rect)
        );
        assert_eq!(
            clip_rectangle(&rect, ClipBounds::new(Some(7), None).unwrap()).unwrap(),
            Some(Rectangle::new(Point::new(7, 0), 3, 5))
        );
        assert_eq!(
            clip_rectangle(&rect, ClipBounds::new(None, Some(4)).unwrap()).unwrap(),
            None
        );
    }

    #[test]
    fn test_extreme_coordinates_do_not_overflow() {
        let points = ring(&[(-i64::MAX, 0), (i64::MAX, 10), (0, 20)]);
        let clipped = clip(&points, ClipBounds::new(Some(0), None).unwrap());
        assert_eq!(clipped, ring(&[(0, 5), (i64::MAX, 10), (0, 20), (0, 20)]));

        let p = point_on_line_at_x(Point::new(i64::MIN, 0), Point::new(i64::MAX, 0), 0).unwrap();
        assert_eq!(p, Point::new(0, 0));
    }

    #[test]
    fn test_interpolation_out_of_range_is_error() {
        let err = point_on_line_at_x(Point::new(0, 0), Point::new(1, i64::MAX), 4).unwrap_err();
        assert!(matches!(err, GeometryError::CoordinateOverflow { .. }));
    }

    #[test]
    fn test_shift_overflow_is_error() {
        let by = Shift::new(1, 0);
        assert!(matches!(
            shift(&[Point::new(i64::MAX, 0)], by),
            Err(GeometryError::CoordinateOverflow { .. })
        ));
        let err = clip_and_shift(&square(), ClipBounds::unbounded(), Shift::new(0, i64::MAX));
        assert!(err.is_err());
    }

    #[test]
    fn test_rectangle_corner_overflow_is_error() {
        let rect = Rectangle::new(Point::new(i64::MAX - 1, 0), 5, 5);
        assert!(rect.upper_right().is_err());
        assert!(clip_rectangle(&rect, ClipBounds::new(Some(0), None).unwrap()).is_err());
    }
}
