//! Sutherland-Hodgman clipping of convex polygons.

use crate::geometry::{Point, Polygon};

/// On-edge tolerance, relative to the shortest side of the clip polygon.
const EDGE_EPS: f64 = 1e-9;

/// Clips `subject` against the convex, counter-clockwise polygon `clip`.
///
/// Vertices within `EDGE_EPS * shortest side` of a clip edge count as
/// inside, so clipping a polygon by itself returns it unchanged.
pub fn clip_convex(subject: &Polygon, clip: &Polygon) -> Polygon {
    let mut output = *subject;
    let n = clip.len();
    let tol = EDGE_EPS * shortest_edge(clip);

    for k in 0..n {
        if output.len() < 3 {
            output.clear();
            break;
        }
        let a = clip[k];
        let edge = clip[(k + 1) % n] - a;
        let len = edge.norm_sq().sqrt();
        if len == 0.0 {
            continue;
        }
        // Signed distance to the edge line, positive on the inner side.
        let side = |p: &Point| edge.cross(&(*p - a)) / len;

        let input = output;
        output.clear();
        let m = input.len();
        for i in 0..m {
            let p = input[i];
            let q = input[(i + 1) % m];
            let (sp, sq) = (side(&p), side(&q));
            let (p_in, q_in) = (sp >= -tol, sq >= -tol);

            match (p_in, q_in) {
                (true, true) => output.push(q),
                (true, false) => output.push(segment_crossing(p, q, sp, sq)),
                (false, true) => {
                    output.push(segment_crossing(p, q, sp, sq));
                    output.push(q);
                }
                (false, false) => {}
            }
        }
    }

    output
}

/// Length of the shortest non-zero edge of `polygon`.
fn shortest_edge(polygon: &Polygon) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|k| (polygon[(k + 1) % n] - polygon[k]).norm_sq().sqrt())
        .filter(|&len| len > 0.0)
        .fold(f64::INFINITY, f64::min)
}

/// Point where segment `p -> q` crosses the clip line, given both signed
/// distances. Callers guarantee `sp - sq` is non-zero.
fn segment_crossing(p: Point, q: Point, sp: f64, sq: f64) -> Point {
    let t = sp / (sp - sq);
    p + (q - p) * t
}

/// Area of the intersection of two convex counter-clockwise polygons.
/// NaN when either polygon has a non-finite vertex.
pub fn intersection_area(a: &Polygon, b: &Polygon) -> f64 {
    if !(a.is_finite() && b.is_finite()) {
        return f64::NAN;
    }
    clip_convex(a, b).area()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f64, y: f64, side: f64) -> Polygon {
        Polygon::from_points(&[
            Point::new(x, y),
            Point::new(x + side, y),
            Point::new(x + side, y + side),
            Point::new(x, y + side),
        ])
    }

    #[test]
    fn test_overlapping_squares() {
        let a = square(0.0, 0.0, 10.0);
        let b = square(5.0, 5.0, 10.0);
        assert!((intersection_area(&a, &b) - 25.0).abs() < 1e-9);
        assert!((intersection_area(&b, &a) - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_squares() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(3.0, 3.0, 1.0);
        assert_eq!(intersection_area(&a, &b), 0.0);
    }

    #[test]
    fn test_touching_squares_share_no_area() {
        let a = square(0.0, 0.0, 1.0);
        let b = square(1.0, 0.0, 1.0);
        assert!(intersection_area(&a, &b).abs() < 1e-12);
    }

    #[test]
    fn test_contained_square() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(2.0, 2.0, 3.0);
        assert!((intersection_area(&outer, &inner) - 9.0).abs() < 1e-9);
        assert!((intersection_area(&inner, &outer) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_self_clip_keeps_polygon() {
        let a = square(-1.5, 2.0, 4.0);
        let clipped = clip_convex(&a, &a);
        assert_eq!(clipped.len(), 4);
        assert_eq!(clipped.area(), a.area());
    }

    #[test]
    fn test_thin_parallel_strips_stay_apart() {
        let strip = |y: f64| {
            Polygon::from_points(&[
                Point::new(-5e5, y),
                Point::new(5e5, y),
                Point::new(5e5, y + 1e-4),
                Point::new(-5e5, y + 1e-4),
            ])
        };
        assert_eq!(intersection_area(&strip(0.0), &strip(5e-4)), 0.0);
        assert!((intersection_area(&strip(0.0), &strip(5e-5)) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_nan_vertex_poisons_area() {
        let a = square(0.0, 0.0, 1.0);
        let mut b = square(0.5, 0.5, 1.0);
        b.push(Point::new(f64::NAN, 0.0));
        assert!(intersection_area(&a, &b).is_nan());
        assert!(intersection_area(&b, &a).is_nan());
    }

    #[test]
    fn test_diamond_in_square() {
        // Square of side 2 rotated by 45 degrees against the axis-aligned one.
        let h = std::f64::consts::SQRT_2;
        let diamond = Polygon::from_points(&[
            Point::new(0.0, -h),
            Point::new(h, 0.0),
            Point::new(0.0, h),
            Point::new(-h, 0.0),
        ]);
        let axis = square(-1.0, -1.0, 2.0);
        let expected = 8.0 * (std::f64::consts::SQRT_2 - 1.0);
        assert!((intersection_area(&diamond, &axis) - expected).abs() < 1e-9);
    }
}
