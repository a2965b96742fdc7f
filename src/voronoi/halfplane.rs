use geo::{Area, Coord, LineString, Polygon, Rect};
use rstar::{PointDistance, RTree};

use crate::voronoi::site::Site;
use crate::voronoi::VoronoiEngine;

/// Voronoi cells built by clipping the clip rectangle with perpendicular bisectors.
///
/// Sites are visited nearest-first through an R-tree; once the next site is farther than twice
/// the cell's radius its bisector cannot reach the cell, so the search stops there.
#[derive(Debug, Clone, Copy, Default)]
pub struct HalfPlaneVoronoi;

impl VoronoiEngine for HalfPlaneVoronoi {
    fn diagram(&self, sites: &[Coord<f64>], tolerance: f64, clip: Rect<f64>) -> Vec<Polygon<f64>> {
        let sites = snap(sites, tolerance);
        let rtree = RTree::bulk_load(sites.iter().enumerate().map(|(i, &coord)| Site::new(i, coord)).collect());

        sites.iter().enumerate()
            .filter_map(|(i, &site)| cell(&rtree, i, site, clip))
            .collect()
    }
}

/// Drop non-finite coordinates and merge sites closer than `tolerance` into the first one,
/// in lexicographic order.
fn snap(sites: &[Coord<f64>], tolerance: f64) -> Vec<Coord<f64>> {
    let mut sorted: Vec<_> = sites.iter().copied()
        .filter(|c| c.x.is_finite() && c.y.is_finite())
        .collect();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));

    let tolerance_2 = tolerance.max(0.0).powi(2);
    let mut kept: RTree<Site> = RTree::new();
    let mut snapped = Vec::with_capacity(sorted.len());
    for coord in sorted {
        let point = [coord.x, coord.y];
        if kept.nearest_neighbor(&point).is_some_and(|site| site.distance_2(&point) <= tolerance_2) {
            continue;
        }
        kept.insert(Site::new(snapped.len(), coord));
        snapped.push(coord);
    }
    snapped
}

fn cell(rtree: &RTree<Site>, idx: usize, site: Coord<f64>, clip: Rect<f64>) -> Option<Polygon<f64>> {
    let (lower, upper) = (clip.min(), clip.max());
    let mut ring = vec![
        lower,
        Coord { x: upper.x, y: lower.y },
        upper,
        Coord { x: lower.x, y: upper.y },
    ];

    let mut reach = radius_2(&ring, site);
    for neighbour in rtree.nearest_neighbor_iter(&[site.x, site.y]) {
        if neighbour.idx() == idx { continue }
        if neighbour.distance_2(&[site.x, site.y]) >= 4.0 * reach { break }

        ring = clip_half_plane(&ring, site, neighbour.coord());
        if ring.len() < 3 { return None }
        reach = radius_2(&ring, site);
    }

    let polygon = Polygon::new(LineString::from(ring), vec![]);
    (polygon.unsigned_area() > 0.0).then_some(polygon)
}

/// Squared distance from `site` to the farthest vertex of `ring`.
#[inline]
fn radius_2(ring: &[Coord<f64>], site: Coord<f64>) -> f64 {
    ring.iter()
        .map(|v| (v.x - site.x).powi(2) + (v.y - site.y).powi(2))
        .fold(0.0, f64::max)
}

/// Keep the part of the convex `ring` that is at least as close to `site` as to `other`.
fn clip_half_plane(ring: &[Coord<f64>], site: Coord<f64>, other: Coord<f64>) -> Vec<Coord<f64>> {
    let normal = other - site;
    let mid = (site + other) / 2.0;
    let side = |p: Coord<f64>| (p.x - mid.x) * normal.x + (p.y - mid.y) * normal.y;

    let mut out = Vec::with_capacity(ring.len() + 1);
    for (i, &a) in ring.iter().enumerate() {
        let b = ring[(i + 1) % ring.len()];
        let (da, db) = (side(a), side(b));
        if da <= 0.0 { out.push(a); }
        if (da < 0.0 && db > 0.0) || (da > 0.0 && db < 0.0) {
            out.push(a + (b - a) * (da / (da - db)));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::{coord, Contains, Point};

    use super::*;

    fn square(size: f64) -> Rect<f64> {
        Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: size, y: size })
    }

    #[test]
    fn snapping_merges_close_sites() {
        let sites = [coord! { x: 5.0, y: 5.0 }, coord! { x: 0.05, y: 0.0 }, coord! { x: 0.0, y: 0.0 }, coord! { x: 0.0, y: 0.0 }];
        assert_eq!(snap(&sites, 0.1), vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 5.0, y: 5.0 }]);
        assert_eq!(snap(&sites, 0.0).len(), 3);
        assert!(snap(&[coord! { x: f64::NAN, y: 0.0 }], 0.0).is_empty());
    }

    #[test]
    fn half_plane_clip_splits_a_square() {
        let ring = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 2.0, y: 0.0 }, coord! { x: 2.0, y: 2.0 }, coord! { x: 0.0, y: 2.0 }];
        let left = clip_half_plane(&ring, coord! { x: 0.5, y: 1.0 }, coord! { x: 1.5, y: 1.0 });
        let area = Polygon::new(LineString::from(left.clone()), vec![]).unsigned_area();
        assert_eq!(left.len(), 4);
        assert_relative_eq!(area, 2.0);
        assert!(left.iter().all(|c| c.x <= 1.0));
    }

    #[test]
    fn grid_cells_tile_the_clip_rectangle() {
        let sites: Vec<_> = (0..3).flat_map(|i| (0..3).map(move |j| coord! { x: 1.0 + 2.0 * i as f64, y: 1.0 + 2.0 * j as f64 })).collect();
        let cells = HalfPlaneVoronoi.diagram(&sites, 0.0, square(6.0));

        assert_eq!(cells.len(), 9);
        for cell in &cells {
            assert_relative_eq!(cell.unsigned_area(), 4.0, epsilon = 1e-9);
            assert_eq!(sites.iter().filter(|&&s| cell.contains(&Point::from(s))).count(), 1);
        }
    }

    #[test]
    fn irregular_sites_cover_the_clip_rectangle() {
        let sites = [
            coord! { x: 1.0, y: 1.0 }, coord! { x: 7.5, y: 2.0 }, coord! { x: 3.0, y: 8.0 },
            coord! { x: 4.2, y: 4.9 }, coord! { x: 9.0, y: 9.5 }, coord! { x: 0.5, y: 6.0 },
        ];
        let cells = HalfPlaneVoronoi.diagram(&sites, 0.0, square(10.0));
        assert_eq!(cells.len(), sites.len());

        let total: f64 = cells.iter().map(|cell| cell.unsigned_area()).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn cells_outside_the_clip_are_dropped() {
        let sites = [coord! { x: 1.0, y: 1.0 }, coord! { x: 30.0, y: 1.0 }];
        let cells = HalfPlaneVoronoi.diagram(&sites, 0.0, square(2.0));
        assert_eq!(cells.len(), 1);
        assert_relative_eq!(cells[0].unsigned_area(), 4.0);
    }
}
