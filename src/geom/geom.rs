use geo::{BoundingRect, Geometry, Rect};

/// A geometry tagged with the integer id of its CRS. An SRID of 0 means "unset".
#[derive(Debug, Clone, PartialEq)]
pub struct SridGeometry {
    geometry: Geometry<f64>,
    srid: i32,
}

impl SridGeometry {
    pub fn new(geometry: impl Into<Geometry<f64>>, srid: i32) -> Self {
        Self { geometry: geometry.into(), srid }
    }

    /// Get a reference to the wrapped geometry.
    #[inline] pub fn geometry(&self) -> &Geometry<f64> { &self.geometry }

    /// Get the SRID, 0 if unset.
    #[inline] pub fn srid(&self) -> i32 { self.srid }

    /// Replace the SRID without touching coordinates.
    #[inline]
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    #[inline] pub fn into_inner(self) -> Geometry<f64> { self.geometry }

    /// Bounding rectangle of the geometry, `None` when it has no coordinates.
    #[inline] pub fn bounding_rect(&self) -> Option<Rect<f64>> { self.geometry.bounding_rect() }
}

impl From<Geometry<f64>> for SridGeometry {
    fn from(geometry: Geometry<f64>) -> Self {
        Self::new(geometry, 0)
    }
}
