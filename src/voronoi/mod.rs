mod halfplane;
mod site;
mod voronoi;

pub use halfplane::HalfPlaneVoronoi;
pub use voronoi::{clip_envelope, voronoi_polygons, voronoi_polygons_with, VoronoiEngine};
