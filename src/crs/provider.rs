use geo::Coord;
use log::{trace, warn};
use proj4rs::{proj::Proj, transform::transform};

use crate::crs::{parse_identifier, AuthorityRegistry, AxisOrder, Crs, ProjDefinition};
use crate::error::{CrsError, LookupError, Result, WktError};
use crate::wkt::parse_wkt;

/// A coordinate operation between two CRSs.
pub trait MathTransform {
    /// Transform one coordinate, given and returned in the axis order of the respective CRS.
    fn transform(&self, coord: Coord<f64>) -> Result<Coord<f64>>;
}

/// The CRS library capabilities the resolver and reprojector depend on.
pub trait CrsProvider {
    /// Look up an `AUTHORITY:CODE` reference. Returns the CRS in its native axis order.
    fn for_code(&self, code: &str) -> std::result::Result<Crs, LookupError>;

    /// Read a WKT CRS description. Returns the CRS in its declared axis order.
    fn from_wkt(&self, wkt: &str) -> std::result::Result<Crs, WktError>;

    /// Whether two CRSs describe the same coordinates, ignoring names and identifiers.
    fn equals_ignore_metadata(&self, a: &Crs, b: &Crs) -> bool {
        a.equals_ignore_metadata(b)
    }

    /// Derive an operation from `source` to `target`. With `lenient`, a missing datum shift
    /// is tolerated instead of failing.
    fn find_operation(&self, source: &Crs, target: &Crs, lenient: bool) -> Result<Box<dyn MathTransform>>;
}

/// [`CrsProvider`] backed by proj4rs and an [`AuthorityRegistry`].
#[derive(Debug, Clone, Default)]
pub struct Proj4Provider {
    registry: AuthorityRegistry,
}

impl Proj4Provider {
    pub fn new(registry: AuthorityRegistry) -> Self {
        Self { registry }
    }

    #[inline] pub fn registry(&self) -> &AuthorityRegistry { &self.registry }
}

/// Grid shifts are never loaded, so `+nadgrids` is left out of what proj4rs sees, along with
/// keys that only carry metadata. Without datum parameters proj4rs skips the datum step, which is
/// what `@null` asks for.
fn build_proj(definition: &ProjDefinition) -> std::result::Result<Proj, String> {
    let mut definition = definition.clone();
    for key in ["nadgrids", "wktext", "title", "type", "no_defs"] { definition.remove(key); }
    let proj_string = definition.to_proj_string();
    Proj::from_proj_string(&proj_string).map_err(|e| format!("failed to build PROJ.4 '{proj_string}': {e}"))
}

impl CrsProvider for Proj4Provider {
    fn for_code(&self, code: &str) -> std::result::Result<Crs, LookupError> {
        let identifier = parse_identifier(code)
            .ok_or_else(|| LookupError::NotAnIdentifier(code.to_string()))?;

        let entry = self.registry.lookup(&identifier)
            .ok_or_else(|| LookupError::NoSuchAuthorityCode {
                authority: identifier.authority().to_string(),
                code: identifier.code().to_string(),
            })?;

        // Make sure the definition is usable before handing it out.
        build_proj(&entry.definition).map_err(LookupError::Factory)?;

        Ok(Crs::new(entry.name, Some(identifier), entry.definition, entry.native_axis_order))
    }

    fn from_wkt(&self, wkt: &str) -> std::result::Result<Crs, WktError> {
        parse_wkt(wkt)
    }

    fn find_operation(&self, source: &Crs, target: &Crs, lenient: bool) -> Result<Box<dyn MathTransform>> {
        let no_path = |reason: String| CrsError::NoTransformPath {
            from: source.to_string(),
            to: target.to_string(),
            reason,
        };

        let (src, dst) = (source.definition(), target.definition());
        let same_datum = src.datum_key() == dst.datum_key();
        let (src, dst) = if same_datum || (src.has_datum_shift() && dst.has_datum_shift()) {
            (src.clone(), dst.clone())
        } else if lenient {
            warn!("no datum shift available between {source} and {target}; transforming without it");
            (src.without_datum_shift(), dst.without_datum_shift())
        } else {
            return Err(no_path("Bursa-Wolf parameters required".to_string()));
        };

        trace!("deriving operation '{src}' -> '{dst}'");
        let operation = Proj4Transform {
            src: build_proj(&src).map_err(no_path)?,
            dst: build_proj(&dst).map_err(no_path)?,
            src_is_geo: src.is_latlong(),
            dst_is_geo: dst.is_latlong(),
            swap_in: source.axis_order() == AxisOrder::NorthEast,
            swap_out: target.axis_order() == AxisOrder::NorthEast,
        };
        Ok(Box::new(operation))
    }
}

/// proj4rs works in radians for geographic CRSs; this wrapper takes and returns degrees.
struct Proj4Transform {
    src: Proj,
    dst: Proj,
    src_is_geo: bool,
    dst_is_geo: bool,
    swap_in: bool,
    swap_out: bool,
}

impl MathTransform for Proj4Transform {
    fn transform(&self, coord: Coord<f64>) -> Result<Coord<f64>> {
        let failed = |reason: String| CrsError::CoordinateTransform { x: coord.x, y: coord.y, reason };

        let (x, y) = if self.swap_in { (coord.y, coord.x) } else { (coord.x, coord.y) };
        let mut point = if self.src_is_geo { (x.to_radians(), y.to_radians(), 0.0) } else { (x, y, 0.0) };

        transform(&self.src, &self.dst, &mut point).map_err(|e| failed(e.to_string()))?;

        let (x, y) = if self.dst_is_geo { (point.0.to_degrees(), point.1.to_degrees()) } else { (point.0, point.1) };
        if !x.is_finite() || !y.is_finite() {
            return Err(failed("result is not finite".to_string()));
        }

        Ok(if self.swap_out { Coord { x: y, y: x } } else { Coord { x, y } })
    }
}
