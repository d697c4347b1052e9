//! Arena-space geometry
//!
//! All shapes live in arena space: origin at the arena centre, Y up.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A closed interval `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Shrink the range by `x` on both ends. Returns None if nothing is left.
    pub fn shrink(&self, x: f64) -> Option<Range> {
        let shrunk = Range::new(self.min + x, self.max - x);
        (shrunk.min <= shrunk.max).then_some(shrunk)
    }

    /// Uniform sample inside the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.min + rng.random::<f64>() * self.width()
    }
}

/// A circle: the physical shape of obstacles and players
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub pos: DVec2,
    pub radius: f64,
}

impl Circle {
    pub fn new(pos: DVec2, radius: f64) -> Self {
        Self { pos, radius }
    }

    /// True if the two circles touch or overlap
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.pos.distance(other.pos) <= self.radius + other.radius
    }
}

/// Axis-aligned rectangle described by its centre and size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub center: DVec2,
    pub width: f64,
    pub height: f64,
}

impl Rectangle {
    pub fn new(center: DVec2, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.center.x - self.width / 2.0
    }

    pub fn right(&self) -> f64 {
        self.center.x + self.width / 2.0
    }

    pub fn top(&self) -> f64 {
        self.center.y + self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.center.y - self.height / 2.0
    }

    pub fn range_h(&self) -> Range {
        Range::new(self.left(), self.right())
    }

    pub fn range_v(&self) -> Range {
        Range::new(self.bottom(), self.top())
    }

    /// True if the circle lies entirely inside the rectangle
    pub fn contains_circle(&self, c: &Circle) -> bool {
        self.left() + c.radius <= c.pos.x
            && self.right() - c.radius >= c.pos.x
            && self.bottom() + c.radius <= c.pos.y
            && self.top() - c.radius >= c.pos.y
    }

    /// Split into `n` rectangles of similar area by bisecting the longer side.
    ///
    /// Odd counts give the extra piece to the left/bottom half. `n == 0`
    /// yields nothing.
    pub fn partition(&self, n: usize) -> Vec<Rectangle> {
        match n {
            0 => Vec::new(),
            1 => vec![*self],
            _ => {
                let (first, second) = if self.width > self.height {
                    let offset = DVec2::new(self.width / 4.0, 0.0);
                    (
                        Rectangle::new(self.center - offset, self.width / 2.0, self.height),
                        Rectangle::new(self.center + offset, self.width / 2.0, self.height),
                    )
                } else {
                    let offset = DVec2::new(0.0, self.height / 4.0);
                    (
                        Rectangle::new(self.center - offset, self.width, self.height / 2.0),
                        Rectangle::new(self.center + offset, self.width, self.height / 2.0),
                    )
                };

                let mut parts = first.partition(n - n / 2);
                parts.extend(second.partition(n / 2));
                parts
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_overlap() {
        let a = Circle::new(DVec2::ZERO, 5.0);
        assert!(!a.overlaps(&Circle::new(DVec2::new(10.0, 10.0), 5.0)));
        // Touching counts as overlap
        assert!(a.overlaps(&Circle::new(DVec2::new(10.0, 0.0), 5.0)));
    }

    #[test]
    fn test_contains_circle() {
        let area = Rectangle::new(DVec2::ZERO, 20.0, 20.0);
        assert!(area.contains_circle(&Circle::new(DVec2::new(5.0, -5.0), 4.0)));
        assert!(area.contains_circle(&Circle::new(DVec2::new(6.0, 0.0), 4.0)));
        assert!(!area.contains_circle(&Circle::new(DVec2::new(7.0, 0.0), 4.0)));
        assert!(!area.contains_circle(&Circle::new(DVec2::new(20.0, 20.0), 4.0)));
    }

    #[test]
    fn test_partition_four() {
        let a = Rectangle::new(DVec2::ZERO, 10.0, 10.0);
        let parts = a.partition(4);
        let expect = [(-2.5, -2.5), (2.5, -2.5), (-2.5, 2.5), (2.5, 2.5)];

        assert_eq!(parts.len(), 4);
        for (p, e) in parts.iter().zip(expect) {
            assert!((p.center.x - e.0).abs() < 1e-9, "got {:?}", p.center);
            assert!((p.center.y - e.1).abs() < 1e-9, "got {:?}", p.center);
            assert!((p.width - 5.0).abs() < 1e-9);
            assert!((p.height - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_partition_covers_area() {
        let a = Rectangle::new(DVec2::ZERO, 40.0, 20.0);
        for n in 1..=7 {
            let parts = a.partition(n);
            assert_eq!(parts.len(), n);
            let area: f64 = parts.iter().map(|p| p.width * p.height).sum();
            assert!((area - 800.0).abs() < 1e-9);
        }
        assert!(a.partition(0).is_empty());
    }

    #[test]
    fn test_range_shrink() {
        let r = Range::new(-10.0, 0.0);
        assert_eq!(r.shrink(2.0), Some(Range::new(-8.0, -2.0)));
        assert_eq!(r.shrink(6.0), None);
    }
}
