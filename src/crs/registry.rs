use std::sync::LazyLock;

use ahash::AHashMap;
use regex::Regex;

use crate::crs::{AxisOrder, Identifier, ProjDefinition};

/// A definition known to an authority registry.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorityEntry {
    pub name: String,
    pub definition: ProjDefinition,
    pub native_axis_order: AxisOrder,
}

impl AuthorityEntry {
    /// Build an entry; geographic definitions default to the EPSG latitude-first order.
    pub fn new(name: impl Into<String>, proj4: &str) -> Self {
        let definition = ProjDefinition::parse(proj4);
        let native_axis_order = if definition.is_latlong() { AxisOrder::NorthEast }
            else { AxisOrder::EastNorth };
        Self { name: name.into(), definition, native_axis_order }
    }

    pub fn with_axis_order(mut self, axis_order: AxisOrder) -> Self {
        self.native_axis_order = axis_order;
        self
    }
}

/// Maps `AUTHORITY:CODE` identifiers to PROJ.4 definitions.
///
/// A set of common EPSG codes is built in; entries registered at runtime take precedence.
#[derive(Debug, Clone, Default)]
pub struct AuthorityRegistry {
    entries: AHashMap<Identifier, AuthorityEntry>,
}

impl AuthorityRegistry {
    pub fn new() -> Self { Self::default() }

    /// Register (or override) a definition.
    pub fn register(&mut self, identifier: Identifier, entry: AuthorityEntry) {
        self.entries.insert(identifier, entry);
    }

    #[inline] pub fn len(&self) -> usize { self.entries.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Look up an identifier among the registered entries, then the built-in ones.
    pub fn lookup(&self, identifier: &Identifier) -> Option<AuthorityEntry> {
        if let Some(entry) = self.entries.get(identifier) { return Some(entry.clone()) }

        match identifier.authority() {
            "EPSG" => identifier.code().parse().ok().and_then(builtin_epsg),
            "OGC" | "CRS" if ["84", "CRS84"].iter().any(|code| identifier.code().eq_ignore_ascii_case(code)) => Some(
                AuthorityEntry::new("WGS 84 (CRS84)", WGS84).with_axis_order(AxisOrder::EastNorth)
            ),
            _ => None,
        }
    }
}

static AUTHORITY_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_.\-]*)\s*:\s*([A-Za-z0-9_.\-]+)\s*$").unwrap()
});

static OGC_URN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*urn:ogc:def:crs:([A-Za-z0-9_.\-]+):[A-Za-z0-9_.\-]*:([A-Za-z0-9_.\-]+)\s*$").unwrap()
});

static OGC_URI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*https?://www\.opengis\.net/def/crs/([A-Za-z0-9_.\-]+)/[A-Za-z0-9_.\-]+/([A-Za-z0-9_.\-]+)\s*$").unwrap()
});

/// Parse `EPSG:4326`, `urn:ogc:def:crs:EPSG::4326` or
/// `http://www.opengis.net/def/crs/EPSG/0/4326` into an identifier.
pub fn parse_identifier(text: &str) -> Option<Identifier> {
    [&*OGC_URN, &*OGC_URI, &*AUTHORITY_CODE].iter()
        .find_map(|pattern| pattern.captures(text))
        .map(|captures| Identifier::new(&captures[1], &captures[2]))
}

const WGS84: &str = "+proj=longlat +datum=WGS84 +no_defs +type=crs";

/// Built-in EPSG definitions. UTM families are generated from the zone number.
fn builtin_epsg(code: u32) -> Option<AuthorityEntry> {
    let entry = match code {
        4326 => AuthorityEntry::new("WGS 84", WGS84),
        4269 => AuthorityEntry::new("NAD83", "+proj=longlat +datum=NAD83 +no_defs +type=crs"),
        4258 => AuthorityEntry::new("ETRS89", "+proj=longlat +ellps=GRS80 +towgs84=0,0,0,0,0,0,0 +no_defs +type=crs"),
        4267 => AuthorityEntry::new("NAD27", "+proj=longlat +datum=NAD27 +no_defs +type=crs"),
        4230 => AuthorityEntry::new("ED50", "+proj=longlat +ellps=intl +towgs84=-87,-98,-121,0,0,0,0 +no_defs +type=crs"),
        4277 => AuthorityEntry::new("OSGB36", "+proj=longlat +datum=OSGB36 +no_defs +type=crs"),
        3857 | 900913 => AuthorityEntry::new(
            "WGS 84 / Pseudo-Mercator",
            "+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +nadgrids=@null +wktext +no_defs +type=crs",
        ),
        3395 => AuthorityEntry::new(
            "WGS 84 / World Mercator",
            "+proj=merc +lon_0=0 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs +type=crs",
        ),
        4087 => AuthorityEntry::new(
            "WGS 84 / World Equidistant Cylindrical",
            "+proj=eqc +lat_ts=0 +lat_0=0 +lon_0=0 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs +type=crs",
        ),
        27700 => AuthorityEntry::new(
            "OSGB36 / British National Grid",
            "+proj=tmerc +lat_0=49 +lon_0=-2 +k=0.9996012717 +x_0=400000 +y_0=-100000 +ellps=airy \
             +towgs84=446.448,-125.157,542.06,0.15,0.247,0.842,-20.489 +units=m +no_defs +type=crs",
        ),
        2154 => AuthorityEntry::new(
            "RGF93 v1 / Lambert-93",
            "+proj=lcc +lat_0=46.5 +lon_0=3 +lat_1=49 +lat_2=44 +x_0=700000 +y_0=6600000 +ellps=GRS80 \
             +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs",
        ),
        3035 => AuthorityEntry::new(
            "ETRS89-extended / LAEA Europe",
            "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 \
             +towgs84=0,0,0,0,0,0,0 +units=m +no_defs +type=crs",
        ),
        5070 => AuthorityEntry::new(
            "NAD83 / Conus Albers",
            "+proj=aea +lat_0=23 +lon_0=-96 +lat_1=29.5 +lat_2=45.5 +x_0=0 +y_0=0 +datum=NAD83 +units=m +no_defs +type=crs",
        ),
        3413 => AuthorityEntry::new(
            "WGS 84 / NSIDC Sea Ice Polar Stereographic North",
            "+proj=stere +lat_0=90 +lat_ts=70 +lon_0=-45 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs +type=crs",
        ),
        3031 => AuthorityEntry::new(
            "WGS 84 / Antarctic Polar Stereographic",
            "+proj=stere +lat_0=-90 +lat_ts=-71 +lon_0=0 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs +type=crs",
        ),
        32601..=32660 => utm("WGS 84", code - 32600, true, "+datum=WGS84"),
        32701..=32760 => utm("WGS 84", code - 32700, false, "+datum=WGS84"),
        26901..=26923 => utm("NAD83", code - 26900, true, "+datum=NAD83"),
        26701..=26722 => utm("NAD27", code - 26700, true, "+datum=NAD27"),
        25828..=25838 => utm("ETRS89", code - 25800, true, "+ellps=GRS80 +towgs84=0,0,0,0,0,0,0"),
        _ => return None,
    };
    Some(entry)
}

fn utm(datum_name: &str, zone: u32, north: bool, datum: &str) -> AuthorityEntry {
    let (hemisphere, south) = if north { ("N", "") } else { ("S", " +south") };
    AuthorityEntry::new(
        format!("{datum_name} / UTM zone {zone}{hemisphere}"),
        &format!("+proj=utm +zone={zone}{south} {datum} +units=m +no_defs +type=crs"),
    )
}
