use geo::{BoundingRect, Coord, CoordsIter, Geometry, GeometryCollection, Polygon, Rect};
use log::trace;

use crate::voronoi::HalfPlaneVoronoi;

/// Computes Voronoi cells.
pub trait VoronoiEngine {
    /// One polygon per site whose cell intersects `clip`, clipped to it. Sites within
    /// `tolerance` of each other count as one.
    fn diagram(&self, sites: &[Coord<f64>], tolerance: f64, clip: Rect<f64>) -> Vec<Polygon<f64>>;
}

/// Voronoi polygons of the vertices of `sites`, using [`HalfPlaneVoronoi`].
///
/// Returns `None` when `sites` is `None`, otherwise a geometry collection of cells clipped to
/// [`clip_envelope`].
pub fn voronoi_polygons(sites: Option<&Geometry<f64>>, tolerance: f64, extend_to: Option<&Geometry<f64>>) -> Option<Geometry<f64>> {
    voronoi_polygons_with(&HalfPlaneVoronoi, sites, tolerance, extend_to)
}

/// [`voronoi_polygons`] with a caller-provided engine.
pub fn voronoi_polygons_with<E>(engine: &E, sites: Option<&Geometry<f64>>, tolerance: f64, extend_to: Option<&Geometry<f64>>) -> Option<Geometry<f64>>
where
    E: VoronoiEngine + ?Sized,
{
    let sites = sites?;
    let Some(clip) = clip_envelope(sites, extend_to) else {
        return Some(Geometry::GeometryCollection(GeometryCollection(Vec::new())));
    };

    let coords: Vec<Coord<f64>> = sites.coords_iter().collect();
    trace!("voronoi diagram of {} sites clipped to {clip:?}", coords.len());
    let cells = engine.diagram(&coords, tolerance, clip);

    Some(Geometry::GeometryCollection(cells.into_iter().map(Geometry::Polygon).collect()))
}

/// The rectangle cells are clipped to: the envelope of `extend_to` when it has one, otherwise
/// the envelope of `sites` grown by `max(width, height)` on every side. `None` for empty sites.
pub fn clip_envelope(sites: &Geometry<f64>, extend_to: Option<&Geometry<f64>>) -> Option<Rect<f64>> {
    if let Some(rect) = extend_to.and_then(|geometry| geometry.bounding_rect()) {
        return Some(rect);
    }

    let rect = sites.bounding_rect()?;
    let by = rect.width().max(rect.height());
    Some(Rect::new(
        Coord { x: rect.min().x - by, y: rect.min().y - by },
        Coord { x: rect.max().x + by, y: rect.max().y + by },
    ))
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use approx::assert_relative_eq;
    use geo::{coord, point, Area, Contains, MultiPoint, Point};

    use super::*;

    /// Records its arguments and returns the clip rectangle as the only cell.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(Vec<Coord<f64>>, f64, Rect<f64>)>>,
    }

    impl VoronoiEngine for Recorder {
        fn diagram(&self, sites: &[Coord<f64>], tolerance: f64, clip: Rect<f64>) -> Vec<Polygon<f64>> {
            self.calls.borrow_mut().push((sites.to_vec(), tolerance, clip));
            vec![clip.to_polygon()]
        }
    }

    fn multi_point(coords: &[(f64, f64)]) -> Geometry<f64> {
        Geometry::MultiPoint(MultiPoint(coords.iter().map(|&(x, y)| Point::new(x, y)).collect()))
    }

    fn cells(geometry: &Geometry<f64>) -> &[Geometry<f64>] {
        let Geometry::GeometryCollection(collection) = geometry else { panic!("expected a collection") };
        &collection.0
    }

    #[test]
    fn absent_sites_give_none() {
        let extend_to = multi_point(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(voronoi_polygons(None, 0.0, None).is_none());
        assert!(voronoi_polygons(None, 1.0, Some(&extend_to)).is_none());
    }

    #[test]
    fn empty_sites_give_an_empty_collection() {
        let empty = Geometry::GeometryCollection(GeometryCollection::<f64>(vec![]));
        let recorder = Recorder::default();
        let diagram = voronoi_polygons_with(&recorder, Some(&empty), 0.0, None).unwrap();
        assert!(cells(&diagram).is_empty());
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn default_clip_expands_by_the_larger_side() {
        let sites = multi_point(&[(0.0, 0.0), (4.0, 2.0)]);
        let clip = clip_envelope(&sites, None).unwrap();
        assert_eq!(clip, Rect::new(coord! { x: -4.0, y: -4.0 }, coord! { x: 8.0, y: 6.0 }));
    }

    #[test]
    fn extend_to_sets_the_clip() {
        let sites = multi_point(&[(0.0, 0.0), (4.0, 2.0)]);
        let extend_to = multi_point(&[(-1.0, -2.0), (10.0, 20.0)]);
        let recorder = Recorder::default();
        voronoi_polygons_with(&recorder, Some(&sites), 0.5, Some(&extend_to)).unwrap();

        let calls = recorder.calls.borrow();
        let (coords, tolerance, clip) = &calls[0];
        assert_eq!(coords, &vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 4.0, y: 2.0 }]);
        assert_eq!(*tolerance, 0.5);
        assert_eq!(*clip, Rect::new(coord! { x: -1.0, y: -2.0 }, coord! { x: 10.0, y: 20.0 }));
    }

    #[test]
    fn single_site_fills_the_clip() {
        let site = Geometry::Point(point!(x: 3.0, y: 4.0));
        let extend_to = multi_point(&[(0.0, 0.0), (10.0, 5.0)]);
        let diagram = voronoi_polygons(Some(&site), 0.0, Some(&extend_to)).unwrap();

        let cells = cells(&diagram);
        assert_eq!(cells.len(), 1);
        assert_relative_eq!(cells[0].unsigned_area(), 50.0);

        // A lone point has no extent to grow the clip from.
        let diagram = voronoi_polygons(Some(&site), 0.0, None).unwrap();
        assert!(self::cells(&diagram).is_empty());
    }

    #[test]
    fn two_sites_split_the_clip() {
        let sites = multi_point(&[(0.0, 0.0), (2.0, 0.0)]);
        let extend_to = multi_point(&[(-1.0, -1.0), (3.0, 1.0)]);
        let diagram = voronoi_polygons(Some(&sites), 0.0, Some(&extend_to)).unwrap();

        let cells = cells(&diagram);
        assert_eq!(cells.len(), 2);
        for (cell, site) in cells.iter().zip([point!(x: 0.0, y: 0.0), point!(x: 2.0, y: 0.0)]) {
            let Geometry::Polygon(cell) = cell else { panic!("expected a polygon") };
            assert_relative_eq!(cell.unsigned_area(), 4.0, epsilon = 1e-9);
            assert!(cell.contains(&site));
        }
    }

    #[test]
    fn diagram_covers_the_derived_clip() {
        let sites = multi_point(&[(0.0, 0.0), (3.0, 1.0), (1.0, 2.0), (2.5, 2.5)]);
        let clip = clip_envelope(&sites, None).unwrap();
        let diagram = voronoi_polygons(Some(&sites), 0.0, None).unwrap();

        let cells = cells(&diagram);
        assert_eq!(cells.len(), 4);
        let total: f64 = cells.iter().map(|cell| cell.unsigned_area()).sum();
        assert_relative_eq!(total, clip.unsigned_area(), epsilon = 1e-9);
    }
}
