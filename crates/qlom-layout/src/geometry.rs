//! Planar polygons with holes.

use serde::{Deserialize, Serialize};

/// A point in millimetres.
pub type Point = [f64; 2];

/// A simple polygon with optional holes. Rings are open (the first vertex
/// is not repeated).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Outer ring, counter-clockwise.
    pub exterior: Vec<Point>,
    /// Holes, clockwise.
    pub interiors: Vec<Vec<Point>>,
}

/// Axis-aligned bounding box `(min, max)`.
pub type Bounds = (Point, Point);

impl Polygon {
    /// Axis-aligned rectangle of size `width` x `height` centred on
    /// `(cx, cy)`.
    pub fn rectangle(width: f64, height: f64, cx: f64, cy: f64) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        Self {
            exterior: vec![
                [cx - hw, cy - hh],
                [cx + hw, cy - hh],
                [cx + hw, cy + hh],
                [cx - hw, cy + hh],
            ],
            interiors: Vec::new(),
        }
    }

    /// Bounding box of the exterior ring.
    pub fn bounds(&self) -> Bounds {
        ring_bounds(&self.exterior)
    }

    /// Centre of the bounding box.
    pub fn center(&self) -> Point {
        let ([x0, y0], [x1, y1]) = self.bounds();
        [(x0 + x1) / 2.0, (y0 + y1) / 2.0]
    }

    /// Area of the exterior minus the holes.
    pub fn area(&self) -> f64 {
        signed_area(&self.exterior).abs()
            - self
                .interiors
                .iter()
                .map(|r| signed_area(r).abs())
                .sum::<f64>()
    }

    /// Rotate by `degrees` counter-clockwise about `origin`.
    pub fn rotated_about(&self, degrees: f64, origin: Point) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        let rot = |p: &Point| {
            let (dx, dy) = (p[0] - origin[0], p[1] - origin[1]);
            [origin[0] + c * dx - s * dy, origin[1] + s * dx + c * dy]
        };
        Self {
            exterior: self.exterior.iter().map(rot).collect(),
            interiors: self
                .interiors
                .iter()
                .map(|r| r.iter().map(rot).collect())
                .collect(),
        }
    }

    /// Rotate by `degrees` about the centre of the bounding box.
    pub fn rotated(&self, degrees: f64) -> Self {
        self.rotated_about(degrees, self.center())
    }

    /// Whether `p` lies strictly inside the exterior ring.
    pub fn contains(&self, p: Point) -> bool {
        let ring = &self.exterior;
        let mut inside = false;
        let mut j = ring.len().wrapping_sub(1);
        for i in 0..ring.len() {
            let (a, b) = (ring[i], ring[j]);
            if (a[1] > p[1]) != (b[1] > p[1])
                && p[0] < (b[0] - a[0]) * (p[1] - a[1]) / (b[1] - a[1]) + a[0]
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Cut `hole` out of this polygon. The caller guarantees the hole lies
    /// inside the exterior ring.
    pub fn with_hole(mut self, hole: &Polygon) -> Self {
        let mut ring = hole.exterior.clone();
        if signed_area(&ring) > 0.0 {
            ring.reverse();
        }
        self.interiors.push(ring);
        self
    }
}

fn ring_bounds(ring: &[Point]) -> Bounds {
    ring.iter().fold(
        ([f64::INFINITY; 2], [f64::NEG_INFINITY; 2]),
        |([x0, y0], [x1, y1]), p| {
            ([x0.min(p[0]), y0.min(p[1])], [x1.max(p[0]), y1.max(p[1])])
        },
    )
}

/// Shoelace area, positive for counter-clockwise rings.
fn signed_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let (a, b) = (ring[i], ring[(i + 1) % n]);
            a[0] * b[1] - b[0] * a[1]
        })
        .sum::<f64>()
        / 2.0
}
