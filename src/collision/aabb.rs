// World-space bounds used for box edge tests and oriented-box early-outs

use crate::math::vec2::Vec2;

/// An axis-aligned rectangle defined by its minimum and maximum corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Creates a new Aabb, reordering the corners if needed.
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Aabb {
            min: Vec2::new(min.x.min(max.x), min.y.min(max.y)),
            max: Vec2::new(min.x.max(max.x), min.y.max(max.y)),
        }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Aabb::new(center - half_extents, center + half_extents)
    }

    pub fn top(&self) -> f64 {
        self.max.y
    }

    pub fn bottom(&self) -> f64 {
        self.min.y
    }

    /// Strict overlap: touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_horizontally(other) && self.max.y > other.min.y && self.min.y < other.max.y
    }

    pub fn overlaps_horizontally(&self, other: &Aabb) -> bool {
        self.max.x > other.min.x && self.min.x < other.max.x
    }

    /// Grows this Aabb to contain `other` as well.
    pub fn merge(&mut self, other: &Aabb) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
    }

    /// The tightest Aabb around a point set, or `None` when it is empty.
    pub fn from_points(points: &[Vec2]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Aabb::new(*first, *first);
        for point in rest {
            bounds.merge(&Aabb::new(*point, *point));
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_new_reorders_corners() {
        let b = Aabb::new(Vec2::new(5.0, -1.0), Vec2::new(1.0, 3.0));
        assert_eq!(b.min, Vec2::new(1.0, -1.0));
        assert_eq!(b.max, Vec2::new(5.0, 3.0));
    }

    #[test]
    fn test_aabb_overlap_is_strict() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::new(1.0, 1.0));
        let touching = Aabb::from_center(Vec2::new(2.0, 0.0), Vec2::new(1.0, 1.0));
        let overlapping = Aabb::from_center(Vec2::new(1.5, 0.5), Vec2::new(1.0, 1.0));
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&overlapping));
        assert_eq!(a.top(), 1.0);
        assert_eq!(a.bottom(), -1.0);
    }

    #[test]
    fn test_aabb_from_points() {
        let b = Aabb::from_points(&[
            Vec2::new(1.0, 2.0),
            Vec2::new(-3.0, 0.5),
            Vec2::new(0.0, 7.0),
        ])
        .unwrap();
        assert_eq!(b.min, Vec2::new(-3.0, 0.5));
        assert_eq!(b.max, Vec2::new(1.0, 7.0));
        assert!(Aabb::from_points(&[]).is_none());
    }
}
