use std::ops::Index;
use crate::geometry::Point;

/// Upper bound on the vertices a clipped polygon may carry. Two convex
/// quadrilaterals intersect in at most 8 vertices; the rest is headroom for
/// vertices duplicated by the on-edge tolerance.
pub const MAX_VERTICES: usize = 32;

/// Fixed-capacity polygon, so the clipping kernels never allocate.
#[derive(Debug, Clone, Copy)]
pub struct Polygon {
    vertices: [Point; MAX_VERTICES],
    len: usize,
}

impl Default for Polygon {
    fn default() -> Self {
        Self {
            vertices: [Point::default(); MAX_VERTICES],
            len: 0,
        }
    }
}

impl Polygon {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_points(points: &[Point]) -> Self {
        let mut polygon = Self::new();
        for p in points {
            polygon.push(*p);
        }
        polygon
    }

    /// Appends a vertex. Vertices past `MAX_VERTICES` are dropped.
    pub fn push(&mut self, p: Point) {
        if self.len < MAX_VERTICES {
            self.vertices[self.len] = p;
            self.len += 1;
        }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices[..self.len]
    }

    pub fn is_finite(&self) -> bool {
        self.vertices().iter().all(Point::is_finite)
    }

    /// Shoelace area as a sum of triangle cross products fanned out from the
    /// first vertex. Positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        if self.len < 3 {
            return 0.0;
        }
        let origin = self.vertices[0];
        let mut twice_area = 0.0;
        for i in 1..self.len - 1 {
            let u = self.vertices[i] - origin;
            let v = self.vertices[i + 1] - origin;
            twice_area += u.cross(&v);
        }
        twice_area / 2.0
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }
}

impl Index<usize> for Polygon {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.vertices()[index]
    }
}
