//! Canvas geometry types

use crate::error::{Result, TrellisError};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in canvas coordinates (origin top-left)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
    }

    /// Strict bounding-box intersection. Rectangles that only share an edge
    /// do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// The coordinate space components are expected to stay inside
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanvasBounds {
    pub width: f64,
    pub height: f64,
}

impl CanvasBounds {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Reject bounds no component could ever fit inside
    pub fn validate(&self) -> Result<()> {
        let usable = |v: f64| v.is_finite() && v > 0.0;
        if usable(self.width) && usable(self.height) {
            Ok(())
        } else {
            Err(TrellisError::InvalidCanvasBounds {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Whether `rect` lies entirely inside the canvas
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= 0.0
            && rect.y >= 0.0
            && rect.right() <= self.width
            && rect.bottom() <= self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlapping() {
        let a = Rect::new(0.0, 0.0, 100.0, 40.0);
        let b = Rect::new(50.0, 20.0, 100.0, 40.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 100.0, 40.0);
        let b = Rect::new(100.0, 0.0, 100.0, 40.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_contains() {
        let canvas = CanvasBounds::new(800.0, 600.0);
        assert!(canvas.contains(&Rect::new(0.0, 0.0, 800.0, 600.0)));
        assert!(!canvas.contains(&Rect::new(-1.0, 0.0, 10.0, 10.0)));
        assert!(!canvas.contains(&Rect::new(750.0, 0.0, 100.0, 10.0)));
    }

    #[test]
    fn test_validate_bounds() {
        assert!(CanvasBounds::new(800.0, 600.0).validate().is_ok());
        assert!(CanvasBounds::new(0.0, 600.0).validate().is_err());
        assert!(CanvasBounds::new(f64::NAN, 600.0).validate().is_err());
    }
}
