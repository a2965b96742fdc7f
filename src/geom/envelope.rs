use geo::{Coord, LineString, Polygon, Rect};
use log::debug;

use crate::crs::{Crs, CrsProvider, CrsResolver};
use crate::error::{CrsError, Result};
use crate::geom::SridGeometry;

/// An axis-aligned rectangle, optionally tied to a CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencedEnvelope {
    rect: Rect<f64>,
    crs: Option<Crs>,
}

impl ReferencedEnvelope {
    pub fn new(rect: Rect<f64>, crs: Option<Crs>) -> Self {
        Self { rect, crs }
    }

    /// Bounding box of `geometry`, with the CRS decoded from its SRID when one is set.
    /// Returns `None` for a geometry without coordinates.
    pub fn of_geometry<P: CrsProvider>(geometry: &SridGeometry, resolver: &CrsResolver<P>) -> Result<Option<Self>> {
        let Some(rect) = geometry.bounding_rect() else { return Ok(None) };
        let crs = match geometry.srid() {
            0 => None,
            srid => Some(resolver.crs_from_srid(srid)?),
        };
        Ok(Some(Self::new(rect, crs)))
    }

    #[inline] pub fn rect(&self) -> Rect<f64> { self.rect }
    #[inline] pub fn crs(&self) -> Option<&Crs> { self.crs.as_ref() }
    #[inline] pub fn lower_corner(&self) -> Coord<f64> { self.rect.min() }
    #[inline] pub fn upper_corner(&self) -> Coord<f64> { self.rect.max() }

    /// The envelope as a closed ring, counter-clockwise from the lower corner.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let (lower, upper) = (self.lower_corner(), self.upper_corner());
        Polygon::new(
            LineString::from(vec![
                (lower.x, lower.y),
                (upper.x, lower.y),
                (upper.x, upper.y),
                (lower.x, upper.y),
                (lower.x, lower.y),
            ]),
            vec![],
        )
    }

    /// Reproject the envelope into `target`.
    ///
    /// Each edge is sampled with `densify` extra points before transforming, so curved edges
    /// in the target CRS are still covered by the resulting bounding box.
    pub fn transform<P: CrsProvider>(&self, target: &Crs, resolver: &CrsResolver<P>, densify: usize, lenient: bool) -> Result<Self> {
        let source = self.crs.as_ref().ok_or(CrsError::MissingSourceCrs)?;
        if resolver.equivalent(source, target) {
            debug!("envelope already in {target}");
            return Ok(Self::new(self.rect, Some(target.clone())));
        }

        let operation = resolver.provider().find_operation(source, target, lenient)?;
        let points = boundary(self.rect, densify)
            .map(|coord| operation.transform(coord))
            .collect::<Result<Vec<_>>>()?;

        let rect = points.iter().skip(1).fold(Rect::new(points[0], points[0]), |rect, p| Rect::new(
            Coord { x: rect.min().x.min(p.x), y: rect.min().y.min(p.y) },
            Coord { x: rect.max().x.max(p.x), y: rect.max().y.max(p.y) },
        ));
        Ok(Self::new(rect, Some(target.clone())))
    }
}

/// Points along the rectangle boundary: every corner plus `densify` evenly spaced points per edge.
fn boundary(rect: Rect<f64>, densify: usize) -> impl Iterator<Item = Coord<f64>> {
    let (lower, upper) = (rect.min(), rect.max());
    let corners = [
        lower,
        Coord { x: upper.x, y: lower.y },
        upper,
        Coord { x: lower.x, y: upper.y },
    ];
    let steps = densify + 1;
    (0..4).flat_map(move |i| {
        let (a, b) = (corners[i], corners[(i + 1) % 4]);
        (0..steps).map(move |k| {
            let t = k as f64 / steps as f64;
            Coord { x: a.x + (b.x - a.x) * t, y: a.y + (b.y - a.y) * t }
        })
    })
}
