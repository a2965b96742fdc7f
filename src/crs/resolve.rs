use log::debug;

use crate::crs::{Crs, CrsProvider, Proj4Provider};
use crate::error::{CrsError, Result};

/// Resolves CRS identifiers into longitude-first [`Crs`] handles.
///
/// An identifier is first read as an `AUTHORITY:CODE` reference; only when the provider does not
/// know it is the same text read as WKT. Either way the result is re-oriented longitude-first.
#[derive(Debug, Clone, Default)]
pub struct CrsResolver<P = Proj4Provider> {
    provider: P,
}

impl<P: CrsProvider> CrsResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    #[inline] pub fn provider(&self) -> &P { &self.provider }

    /// Resolve an authority code or a WKT string.
    pub fn resolve(&self, text: &str) -> Result<Crs> {
        let crs = match self.provider.for_code(text) {
            Ok(crs) => crs,
            Err(authority) if authority.is_unknown_code() => {
                debug!("'{text}' is not a known authority code ({authority}), reading it as WKT");
                self.provider.from_wkt(text).map_err(|wkt| CrsError::Resolution {
                    authority: authority.to_string(),
                    wkt: wkt.to_string(),
                })?
            }
            Err(e) => return Err(CrsError::Factory { input: text.to_string(), reason: e.to_string() }),
        };
        Ok(crs.longitude_first())
    }

    /// Resolve `EPSG:<srid>`, longitude-first.
    pub fn crs_from_srid(&self, srid: i32) -> Result<Crs> {
        self.provider.for_code(&format!("EPSG:{srid}"))
            .map(Crs::longitude_first)
            .map_err(|e| CrsError::InvalidSrid { srid, reason: e.to_string() })
    }

    /// Metadata-insensitive comparison, delegated to the provider.
    #[inline]
    pub fn equivalent(&self, a: &Crs, b: &Crs) -> bool {
        self.provider.equals_ignore_metadata(a, b)
    }
}
