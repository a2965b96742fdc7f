#![doc = "georeproj public API: CRS resolution, geometry reprojection and Voronoi polygons"]
mod config;
mod crs;
mod error;
mod geom;
mod reproject;
mod voronoi;
mod wkt;

#[doc(inline)]
pub use config::{AuthorityConfig, Config};

#[doc(inline)]
pub use crs::{
    parse_identifier, AuthorityEntry, AuthorityRegistry, AxisOrder, Crs, CrsKind, CrsProvider, CrsResolver,
    Identifier, MathTransform, Proj4Provider, ProjDefinition,
};

#[doc(inline)]
pub use error::{CrsError, LookupError, Result, WktError};

#[doc(inline)]
pub use geom::{ReferencedEnvelope, SridGeometry};

#[doc(inline)]
pub use reproject::Reprojector;

#[doc(inline)]
pub use voronoi::{clip_envelope, voronoi_polygons, voronoi_polygons_with, HalfPlaneVoronoi, VoronoiEngine};

#[doc(inline)]
pub use wkt::parse_wkt;
