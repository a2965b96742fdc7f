use geo::Coord;
use rstar::{PointDistance, RTreeObject, AABB};

/// A Voronoi site in an R-tree, associated with its cell by index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Site {
    idx: usize, // Index of the site in the snapped site list
    coord: Coord<f64>,
}

impl Site {
    pub(super) fn new(idx: usize, coord: Coord<f64>) -> Self {
        Self { idx, coord }
    }

    /// Get the index of the site.
    #[inline] pub(super) fn idx(&self) -> usize { self.idx }

    /// Get the site location.
    #[inline] pub(super) fn coord(&self) -> Coord<f64> { self.coord }
}

impl RTreeObject for Site {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.coord.into())
    }
}

impl PointDistance for Site {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let (dx, dy) = (self.coord.x - point[0], self.coord.y - point[1]);
        dx * dx + dy * dy
    }
}
