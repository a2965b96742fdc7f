use std::borrow::Cow;

use geo::MapCoords;
use log::{debug, trace};

use crate::config::Config;
use crate::crs::{Crs, CrsProvider, CrsResolver, MathTransform, Proj4Provider};
use crate::error::{CrsError, Result};
use crate::geom::SridGeometry;

/// Reprojects [`SridGeometry`] values between coordinate reference systems.
///
/// Nothing is cached: every call resolves its CRS identifiers and derives a fresh operation.
#[derive(Debug, Clone)]
pub struct Reprojector<P = Proj4Provider> {
    resolver: CrsResolver<P>,
    lenient: bool,
}

impl Default for Reprojector {
    fn default() -> Self {
        Self::new(Proj4Provider::default())
    }
}

impl Reprojector {
    /// Build a reprojector over the built-in registry extended with the configured authorities.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Proj4Provider::new(config.registry())).with_lenient(config.lenient)
    }
}

impl<P: CrsProvider> Reprojector<P> {
    /// Create a lenient reprojector over `provider`.
    pub fn new(provider: P) -> Self {
        Self { resolver: CrsResolver::new(provider), lenient: true }
    }

    /// Set the leniency used by [`Reprojector::transform`] and [`Reprojector::transform_from`].
    pub fn with_lenient(mut self, lenient: bool) -> Self {
        self.lenient = lenient;
        self
    }

    #[inline] pub fn lenient(&self) -> bool { self.lenient }
    #[inline] pub fn resolver(&self) -> &CrsResolver<P> { &self.resolver }

    #[inline]
    pub fn resolve(&self, text: &str) -> Result<Crs> {
        self.resolver.resolve(text)
    }

    #[inline]
    pub fn crs_from_srid(&self, srid: i32) -> Result<Crs> {
        self.resolver.crs_from_srid(srid)
    }

    /// Transform `geometry` from the CRS named by its SRID into `target`.
    pub fn transform<'a>(&self, geometry: &'a SridGeometry, target: &str) -> Result<Cow<'a, SridGeometry>> {
        self.transform_with(geometry, None, target, self.lenient)
    }

    /// Transform `geometry` from `source` into `target`, ignoring its SRID.
    pub fn transform_from<'a>(&self, geometry: &'a SridGeometry, source: &str, target: &str) -> Result<Cow<'a, SridGeometry>> {
        self.transform_with(geometry, Some(source), target, self.lenient)
    }

    /// Resolve `target`, then [`Reprojector::transform_to_given_target`].
    pub fn transform_with<'a>(&self, geometry: &'a SridGeometry, source: Option<&str>, target: &str, lenient: bool) -> Result<Cow<'a, SridGeometry>> {
        source_code(geometry, source)?;
        let target = self.resolve(target)?;
        self.transform_to_given_target(geometry, source, &target, lenient)
    }

    /// Transform `geometry` into an already resolved `target`.
    ///
    /// The source comes from `source` when given, otherwise from the geometry's SRID. When source
    /// and target are equivalent the input is handed back untouched. Otherwise every coordinate
    /// goes through one derived operation; the result carries the target's EPSG code, or 0.
    pub fn transform_to_given_target<'a>(&self, geometry: &'a SridGeometry, source: Option<&str>, target: &Crs, lenient: bool) -> Result<Cow<'a, SridGeometry>> {
        let source = self.resolve(&source_code(geometry, source)?)?;

        if self.resolver.equivalent(&source, target) {
            debug!("{source} and {target} are equivalent, geometry left as is");
            return Ok(Cow::Borrowed(geometry));
        }

        let operation = self.resolver.provider().find_operation(&source, target, lenient)?;
        let operation: &dyn MathTransform = operation.as_ref();
        trace!("transforming geometry from {source} to {target}");

        let transformed = geometry.geometry().try_map_coords(|coord| operation.transform(coord))?;
        Ok(Cow::Owned(SridGeometry::new(transformed, target.epsg().unwrap_or(0))))
    }
}

/// The source CRS identifier: explicit, or `epsg:<srid>`.
fn source_code<'a>(geometry: &SridGeometry, source: Option<&'a str>) -> Result<Cow<'a, str>> {
    match (source, geometry.srid()) {
        (Some(source), _) => Ok(Cow::Borrowed(source)),
        (None, 0) => Err(CrsError::MissingSourceCrs),
        (None, srid) => Ok(Cow::Owned(format!("epsg:{srid}"))),
    }
}
