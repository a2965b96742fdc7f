use std::fmt;

use crate::crs::ProjDefinition;

/// Order of the two horizontal axes of a CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisOrder {
    /// Longitude / easting first.
    EastNorth,
    /// Latitude / northing first (the EPSG order of most geographic CRSs).
    NorthEast,
}

/// Broad classification of a CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrsKind {
    Geographic,
    Projected,
    Geocentric,
}

/// An `AUTHORITY:CODE` pair identifying a CRS.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    authority: String,
    code: String,
}

impl Identifier {
    /// Create an identifier; the authority name is stored upper-case.
    pub fn new(authority: &str, code: &str) -> Self {
        Self { authority: authority.trim().to_ascii_uppercase(), code: code.trim().to_string() }
    }

    #[inline] pub fn authority(&self) -> &str { &self.authority }
    #[inline] pub fn code(&self) -> &str { &self.code }

    /// The numeric EPSG code, when this is an EPSG identifier.
    pub fn epsg(&self) -> Option<i32> {
        if self.authority != "EPSG" { return None }
        self.code.parse().ok()
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

/// A resolved coordinate reference system.
///
/// The geodetic content lives in a PROJ.4 definition that the CRS library can instantiate;
/// name and identifier are metadata and play no part in [`Crs::equals_ignore_metadata`].
#[derive(Debug, Clone, PartialEq)]
pub struct Crs {
    name: String,
    identifier: Option<Identifier>,
    kind: CrsKind,
    definition: ProjDefinition,
    native_axis_order: AxisOrder,
    axis_order: AxisOrder,
}

impl Crs {
    /// Create a CRS in its native axis order.
    pub fn new(name: impl Into<String>, identifier: Option<Identifier>, definition: ProjDefinition, native_axis_order: AxisOrder) -> Self {
        let kind = if definition.is_latlong() { CrsKind::Geographic }
            else if definition.is_geocentric() { CrsKind::Geocentric }
            else { CrsKind::Projected };

        Self {
            name: name.into(),
            identifier,
            kind,
            definition,
            native_axis_order,
            axis_order: native_axis_order,
        }
    }

    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn identifier(&self) -> Option<&Identifier> { self.identifier.as_ref() }
    #[inline] pub fn kind(&self) -> CrsKind { self.kind }
    #[inline] pub fn definition(&self) -> &ProjDefinition { &self.definition }

    /// Axis order the defining authority or WKT declared.
    #[inline] pub fn native_axis_order(&self) -> AxisOrder { self.native_axis_order }

    /// Axis order coordinates in this CRS are expressed in.
    #[inline] pub fn axis_order(&self) -> AxisOrder { self.axis_order }

    #[inline] pub fn is_geographic(&self) -> bool { self.kind == CrsKind::Geographic }

    /// The EPSG code of this CRS, if it has an EPSG identifier.
    #[inline] pub fn epsg(&self) -> Option<i32> { self.identifier.as_ref().and_then(Identifier::epsg) }

    /// Name of the first axis in the current axis order.
    pub fn first_axis(&self) -> &'static str {
        match (self.kind, self.axis_order) {
            (CrsKind::Geographic, AxisOrder::EastNorth) => "Geodetic longitude",
            (CrsKind::Geographic, AxisOrder::NorthEast) => "Geodetic latitude",
            (CrsKind::Geocentric, _) => "Geocentric X",
            (CrsKind::Projected, AxisOrder::EastNorth) => "Easting",
            (CrsKind::Projected, AxisOrder::NorthEast) => "Northing",
        }
    }

    /// The same CRS with longitude / easting as the first axis.
    pub fn longitude_first(mut self) -> Self {
        self.axis_order = AxisOrder::EastNorth;
        self
    }

    /// Compare the geodetic content and axis order, ignoring name and identifier.
    pub fn equals_ignore_metadata(&self, other: &Self) -> bool {
        self.axis_order == other.axis_order && self.definition.equivalent(&other.definition)
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Some(id) => write!(f, "{id}"),
            None => write!(f, "{}", self.name),
        }
    }
}
