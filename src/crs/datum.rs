//! Datum and ellipsoid tables shared by the PROJ.4 canonicalizer and the WKT reader.

/// A PROJ.4 datum shorthand and what it expands to.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DatumDef {
    pub(crate) id: &'static str,
    pub(crate) ellps: &'static str,
    pub(crate) towgs84: Option<&'static str>,
    pub(crate) nadgrids: Option<&'static str>,
}

pub(crate) const DATUMS: &[DatumDef] = &[
    DatumDef { id: "WGS84", ellps: "WGS84", towgs84: Some("0,0,0"), nadgrids: None },
    DatumDef { id: "GGRS87", ellps: "GRS80", towgs84: Some("-199.87,74.79,246.62"), nadgrids: None },
    DatumDef { id: "NAD83", ellps: "GRS80", towgs84: Some("0,0,0"), nadgrids: None },
    DatumDef { id: "NAD27", ellps: "clrk66", towgs84: None, nadgrids: Some("@conus,@alaska,@ntv2_0.gsb,@ntv1_can.dat") },
    DatumDef { id: "potsdam", ellps: "bessel", towgs84: Some("598.1,73.7,418.2,0.202,0.045,-2.455,6.7"), nadgrids: None },
    DatumDef { id: "carthage", ellps: "clrk80ign", towgs84: Some("-263.0,6.0,431.0"), nadgrids: None },
    DatumDef { id: "hermannskogel", ellps: "bessel", towgs84: Some("577.326,90.129,463.919,5.137,1.474,5.297,2.4232"), nadgrids: None },
    DatumDef { id: "ire65", ellps: "mod_airy", towgs84: Some("482.530,-130.596,564.557,-1.042,-0.214,-0.631,8.15"), nadgrids: None },
    DatumDef { id: "nzgd49", ellps: "intl", towgs84: Some("59.47,-5.04,187.44,0.47,-0.1,1.024,-4.5993"), nadgrids: None },
    DatumDef { id: "OSGB36", ellps: "airy", towgs84: Some("446.448,-125.157,542.060,0.1502,0.2470,0.8421,-20.4894"), nadgrids: None },
];

/// Semi-major axis and inverse flattening (0 for a sphere).
#[derive(Debug, Clone, Copy)]
pub(crate) struct EllipsoidDef {
    pub(crate) id: &'static str,
    pub(crate) a: f64,
    pub(crate) rf: f64,
}

pub(crate) const ELLIPSOIDS: &[EllipsoidDef] = &[
    EllipsoidDef { id: "WGS84", a: 6378137.0, rf: 298.257223563 },
    EllipsoidDef { id: "GRS80", a: 6378137.0, rf: 298.257222101 },
    EllipsoidDef { id: "WGS72", a: 6378135.0, rf: 298.26 },
    EllipsoidDef { id: "clrk66", a: 6378206.4, rf: 294.9786982138982 },
    EllipsoidDef { id: "clrk80", a: 6378249.145, rf: 293.4663 },
    EllipsoidDef { id: "clrk80ign", a: 6378249.2, rf: 293.4660212936269 },
    EllipsoidDef { id: "bessel", a: 6377397.155, rf: 299.1528128 },
    EllipsoidDef { id: "intl", a: 6378388.0, rf: 297.0 },
    EllipsoidDef { id: "airy", a: 6377563.396, rf: 299.3249646 },
    EllipsoidDef { id: "mod_airy", a: 6377340.189, rf: 299.3249646 },
    EllipsoidDef { id: "krass", a: 6378245.0, rf: 298.3 },
    EllipsoidDef { id: "sphere", a: 6370997.0, rf: 0.0 },
];

pub(crate) fn datum(id: &str) -> Option<&'static DatumDef> {
    DATUMS.iter().find(|datum| datum.id.eq_ignore_ascii_case(id))
}

pub(crate) fn ellipsoid(id: &str) -> Option<&'static EllipsoidDef> {
    ELLIPSOIDS.iter().find(|ellps| ellps.id.eq_ignore_ascii_case(id))
}

/// Find the PROJ.4 ellipsoid shorthand matching the given parameters, if any.
pub(crate) fn ellipsoid_matching(a: f64, rf: f64) -> Option<&'static EllipsoidDef> {
    ELLIPSOIDS.iter().find(|ellps| {
        (ellps.a - a).abs() < 1e-3 && (ellps.rf - rf).abs() < 1e-6
    })
}

/// Map a WKT datum name to a PROJ.4 datum shorthand.
/// Names are compared after dropping case, underscores, spaces and dashes.
pub(crate) fn datum_from_wkt_name(name: &str) -> Option<&'static DatumDef> {
    // ESRI flavoured WKT prefixes datum names with "D_".
    let name = name.strip_prefix("D_").unwrap_or(name);
    let key = name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    let id = match key.as_str() {
        "wgs1984" | "wgs84" | "worldgeodeticsystem1984" | "worldgeodeticsystem1984ensemble" => "WGS84",
        "northamericandatum1983" | "nad83" | "northamerican1983" => "NAD83",
        "northamericandatum1927" | "nad27" | "northamerican1927" => "NAD27",
        "greekgeodeticreferencesystem1987" | "ggrs87" => "GGRS87",
        "potsdam" | "deutscheshauptdreiecksnetz" => "potsdam",
        "carthage" => "carthage",
        "hermannskogel" => "hermannskogel",
        "ireland1965" | "ire65" => "ire65",
        "newzealandgeodeticdatum1949" | "nzgd49" => "nzgd49",
        "osgb1936" | "osgb36" | "ordnancesurveyofgreatbritain1936" => "OSGB36",
        _ => return None,
    };
    datum(id)
}
