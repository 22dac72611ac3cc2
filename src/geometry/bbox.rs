use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a box from `[x_min, y_min, x_max, y_max]` corners.
    ///
    /// Inverted corners clamp the extent to zero rather than producing a
    /// negative width or height.
    pub fn from_corners(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x: x_min,
            y: y_min,
            width: (x_max - x_min).max(0.0),
            height: (y_max - y_min).max(0.0),
        }
    }

    /// All coordinates finite and both extents strictly positive.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn area(&self) -> f64 {
        if self.is_valid() {
            self.width * self.height
        } else {
            0.0
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    fn scaled_down(&self, factor: f64) -> Self {
        Self::new(self.x / factor, self.y / factor, self.width / factor, self.height / factor)
    }
}

/// Intersection-over-Union of two boxes, in `[0, 1]`.
///
/// Malformed boxes (non-finite coordinates, zero or negative extent) score 0.
/// Identical valid boxes score exactly 1.
pub fn intersection_over_union(a: &BoundingBox, b: &BoundingBox) -> f64 {
    if !a.is_valid() || !b.is_valid() {
        return 0.0;
    }
    if a == b {
        return 1.0;
    }

    let scale = overlap_scale(a, b);
    let a = a.scaled_down(scale);
    let b = b.scaled_down(scale);

    let left = a.x.max(b.x);
    let top = a.y.max(b.y);
    let right = (a.x + a.width).min(b.x + b.width);
    let bottom = (a.y + a.height).min(b.y + b.height);

    let inter = (right - left).max(0.0) * (bottom - top).max(0.0);
    if inter <= 0.0 {
        return 0.0;
    }

    let union = a.area() + b.area() - inter;
    if union <= 0.0 {
        return 0.0;
    }

    let ratio = inter / union;
    if !ratio.is_finite() {
        return 0.0;
    }
    ratio.clamp(0.0, 1.0)
}

/// Power of two that brings every coordinate and extent of both boxes into
/// `[-2, 2]`, so edge sums and areas cannot overflow. Dividing by a power of
/// two is exact, so ordinary page boxes score exactly as unscaled.
fn overlap_scale(a: &BoundingBox, b: &BoundingBox) -> f64 {
    let largest = [a.x.abs(), a.y.abs(), a.width, a.height, b.x.abs(), b.y.abs(), b.width, b.height]
        .into_iter()
        .fold(0.0_f64, f64::max);
    if largest <= 1.0 {
        return 1.0;
    }
    2.0_f64.powi((largest.log2().ceil() as i32).min(1023))
}

/// Euclidean distance between box centers. `None` when either box is malformed
/// or the distance is not representable.
pub fn center_distance(a: &BoundingBox, b: &BoundingBox) -> Option<f64> {
    if !a.is_valid() || !b.is_valid() {
        return None;
    }
    let (ax, ay) = a.center();
    let (bx, by) = b.center();
    Some((ax - bx).hypot(ay - by)).filter(|d| d.is_finite())
}
