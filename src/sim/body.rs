//! Rigid bodies for the side-scrolling scene
//!
//! Bodies are axis-aligned boxes described by their center and size, in
//! screen coordinates (y grows downward, like the viewport).

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifies a body for game systems (collision rules, scoring)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyLabel {
    Dino,
    Ground,
    Cactus,
}

impl BodyLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyLabel::Dino => "Dino",
            BodyLabel::Ground => "Ground",
            BodyLabel::Cactus => "Cactus",
        }
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Penetration depth on each axis (positive when overlapping)
    pub fn penetration(&self, other: &Aabb) -> Vec2 {
        Vec2::new(
            self.max.x.min(other.max.x) - self.min.x.max(other.min.x),
            self.max.y.min(other.max.y) - self.min.y.max(other.min.y),
        )
    }
}

/// A simulated box body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub label: BodyLabel,
    /// Center position
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    /// Static bodies never move and are not affected by gravity
    pub is_static: bool,
    /// Resting on a static body after the last physics step
    #[serde(default)]
    pub grounded: bool,
}

impl Body {
    pub fn rectangle(label: BodyLabel, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            label,
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
            vel: Vec2::ZERO,
            is_static: false,
            grounded: false,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }

    /// Left edge x coordinate
    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::from_center(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::from_center(Vec2::new(8.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));

        assert!(a.overlaps(&b));
        // Touching edges only
        assert!(!a.overlaps(&c));

        let pen = a.penetration(&b);
        assert!((pen.x - 2.0).abs() < 0.001);
        assert!((pen.y - 10.0).abs() < 0.001);
    }

    #[test]
    fn test_body_edges() {
        let body = Body::rectangle(BodyLabel::Cactus, 300.0, 320.0, 30.0, 50.0);
        assert_eq!(body.left(), 285.0);
        assert_eq!(body.right(), 315.0);
        assert_eq!(body.bottom(), 345.0);
        assert!(!body.is_static);
    }
}
