use log::debug;

use crate::crs::{datum, AxisOrder, Crs, Identifier, ProjDefinition};
use crate::error::WktError;
use crate::wkt::parser::{WktNode, WktValue};

const GEOGRAPHIC: &[&str] = &["GEOGCS", "GEOGCRS", "GEOGRAPHICCRS", "GEODCRS", "GEODETICCRS"];
const BASE_GEOGRAPHIC: &[&str] = &["GEOGCS", "BASEGEOGCRS", "BASEGEODCRS", "BASEGEOGRAPHICCRS", "BASEGEODETICCRS"];
const PROJECTED: &[&str] = &["PROJCS", "PROJCRS", "PROJECTEDCRS"];
const COMPOUND: &[&str] = &["COMPD_CS", "COMPOUNDCRS"];
const DATUM: &[&str] = &["DATUM", "GEODETICDATUM", "TRF", "ENSEMBLE", "DATUMENSEMBLE"];

/// Convert a parsed WKT CRS into a [`Crs`] in its native axis order.
pub(crate) fn to_crs(node: &WktNode) -> Result<Crs, WktError> {
    let keyword = node.keyword.as_str();

    if COMPOUND.contains(&keyword) {
        // The horizontal component is the first geographic or projected child.
        let horizontal = node.nodes()
            .find(|child| GEOGRAPHIC.contains(&child.keyword.as_str()) || PROJECTED.contains(&child.keyword.as_str()))
            .ok_or_else(|| missing(node, "horizontal CRS"))?;
        return to_crs(horizontal);
    }

    let definition = if GEOGRAPHIC.contains(&keyword) {
        if is_cartesian(node) { geocentric(node)? } else { geographic(node)? }
    } else if keyword == "GEOCCS" {
        geocentric(node)?
    } else if PROJECTED.contains(&keyword) {
        projected(node)?
    } else {
        return Err(WktError::UnsupportedElement(node.keyword.clone()));
    };

    let name = node.name().unwrap_or("unnamed").to_string();
    Ok(Crs::new(name, identifier(node), definition, axis_order(node)))
}

fn missing(node: &WktNode, what: &str) -> WktError {
    WktError::Missing { element: node.keyword.clone(), what: what.to_string() }
}

/// WKT2 geodetic CRSs with a Cartesian coordinate system are geocentric.
fn is_cartesian(node: &WktNode) -> bool {
    node.child("CS")
        .and_then(|cs| cs.keyword_value(0))
        .is_some_and(|kind| kind.eq_ignore_ascii_case("cartesian"))
}

/// `AUTHORITY["EPSG","4326"]` (WKT1) or `ID["EPSG",4326]` (WKT2).
fn identifier(node: &WktNode) -> Option<Identifier> {
    let id = node.child_any(&["AUTHORITY", "ID"])?;
    let authority = id.text(0)?;
    let code = match id.values.get(1)? {
        WktValue::Text(code) => code.clone(),
        WktValue::Number(code) if code.fract() == 0.0 => format!("{}", *code as i64),
        WktValue::Number(code) => code.to_string(),
        _ => return None,
    };
    Some(Identifier::new(authority, &code))
}

/// Axis order from the `AXIS` children, honouring WKT2 `ORDER[n]`. Defaults to east-first.
fn axis_order(node: &WktNode) -> AxisOrder {
    let mut axes = node.children("AXIS")
        .enumerate()
        .map(|(i, axis)| {
            let order = axis.child("ORDER").and_then(|order| order.number(0)).unwrap_or(i as f64);
            (order, axis.keyword_value(1).unwrap_or_default().to_ascii_lowercase())
        })
        .collect::<Vec<_>>();
    axes.sort_by(|a, b| a.0.total_cmp(&b.0));

    match axes.first() {
        Some((_, direction)) if direction.starts_with("north") || direction.starts_with("south") => AxisOrder::NorthEast,
        _ => AxisOrder::EastNorth,
    }
}

/// Unit conversion factor of the first unit element found among `keywords`.
fn unit_factor(node: &WktNode, keywords: &[&str]) -> Option<f64> {
    node.child_any(keywords).and_then(|unit| unit.number(1))
}

/// Linear unit of a projected or geocentric CRS, in metres.
fn linear_unit(node: &WktNode) -> f64 {
    unit_factor(node, &["UNIT", "LENGTHUNIT"])
        .or_else(|| node.children("AXIS").find_map(|axis| unit_factor(axis, &["LENGTHUNIT", "UNIT"])))
        .unwrap_or(1.0)
}

/// Angular unit of a geographic CRS, in radians.
fn angular_unit(node: &WktNode) -> f64 {
    unit_factor(node, &["UNIT", "ANGLEUNIT"])
        .or_else(|| node.children("AXIS").find_map(|axis| unit_factor(axis, &["ANGLEUNIT", "UNIT"])))
        .unwrap_or(1f64.to_radians())
}

/// Convert an angle in a unit of `factor` radians to degrees, leaving degree values untouched.
fn to_degrees(value: f64, factor: f64) -> f64 {
    let scale = factor.to_degrees();
    if (scale - 1.0).abs() < 1e-12 { value } else { value * scale }
}

/// Datum, ellipsoid and prime meridian parameters of a geodetic CRS.
fn geodetic_params(node: &WktNode, definition: &mut ProjDefinition) -> Result<(), WktError> {
    let datum_node = node.child_any(DATUM).ok_or_else(|| missing(node, "DATUM"))?;
    let spheroid = datum_node.child_any(&["SPHEROID", "ELLIPSOID"])
        .or_else(|| node.child_any(&["SPHEROID", "ELLIPSOID"]));

    let ellipsoid = match spheroid {
        Some(spheroid) => {
            let a = spheroid.number(1).ok_or_else(|| missing(spheroid, "semi-major axis"))?;
            let rf = spheroid.number(2).ok_or_else(|| missing(spheroid, "inverse flattening"))?;
            Some((a, rf))
        }
        None => None,
    };

    let towgs84 = datum_node.child("TOWGS84").map(|shift| {
        shift.values.iter()
            .filter_map(|value| match value {
                WktValue::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join(",")
    });

    // A known datum is only used when its ellipsoid agrees with the one spelled out.
    let known = datum_node.name()
        .and_then(datum::datum_from_wkt_name)
        .filter(|def| match (ellipsoid, datum::ellipsoid(def.ellps)) {
            (Some((a, rf)), Some(e)) => (e.a - a).abs() < 1e-3 && (e.rf - rf).abs() < 1e-6,
            _ => true,
        });

    match (known, towgs84) {
        (Some(def), None) => { definition.set("datum", def.id); }
        (known, towgs84) => {
            match (ellipsoid, known) {
                (Some((a, rf)), _) => match datum::ellipsoid_matching(a, rf) {
                    Some(e) => { definition.set("ellps", e.id); }
                    None if rf == 0.0 => { definition.set("R", a); }
                    None => { definition.set("a", a).set("rf", rf); }
                },
                (None, Some(def)) => { definition.set("ellps", def.ellps); }
                (None, None) => return Err(missing(datum_node, "ELLIPSOID")),
            }
            if let Some(towgs84) = towgs84 { definition.set("towgs84", towgs84); }
        }
    }

    if let Some(pm) = node.child_any(&["PRIMEM", "PRIMEMERIDIAN"]).and_then(|pm| pm.number(1)) {
        let pm = to_degrees(pm, angular_unit(node));
        if pm != 0.0 { definition.set("pm", pm); }
    }

    Ok(())
}

fn geographic(node: &WktNode) -> Result<ProjDefinition, WktError> {
    // Geographic coordinates are exchanged in degrees.
    let unit = angular_unit(node);
    if (unit.to_degrees() - 1.0).abs() >= 1e-12 {
        return Err(WktError::InvalidValue { what: "angular unit".to_string(), value: unit.to_string() });
    }

    let mut definition = ProjDefinition::with_projection("longlat");
    geodetic_params(node, &mut definition)?;
    definition.flag("no_defs");
    Ok(definition)
}

fn geocentric(node: &WktNode) -> Result<ProjDefinition, WktError> {
    let mut definition = ProjDefinition::with_projection("geocent");
    geodetic_params(node, &mut definition)?;
    let unit = linear_unit(node);
    if unit != 1.0 { definition.set("to_meter", unit); } else { definition.set("units", "m"); }
    definition.flag("no_defs");
    Ok(definition)
}

/// Projection methods, keyed by the method name reduced to lower-case alphanumerics.
fn projection_for(method: &str) -> Option<&'static str> {
    let proj = match method {
        "transversemercator" | "gaussboagaz" | "gausskruger" => "tmerc",
        "mercator" | "mercator1sp" | "mercatorvarianta" | "mercator2sp" | "mercatorvariantb" => "merc",
        "popularvisualisationpseudomercator" | "pseudomercator" | "mercatorauxiliarysphere" => "webmerc",
        "lambertconformalconic1sp" | "lambertconicconformal1sp" => "lcc1sp",
        "lambertconformalconic2sp" | "lambertconicconformal2sp" | "lambertconformalconic" => "lcc",
        "albersconicequalarea" | "albersequalarea" | "albers" => "aea",
        "polarstereographic" | "polarstereographicvarianta" | "polarstereographicvariantb" => "polar",
        "obliquestereographic" | "doublestereographic" => "sterea",
        "stereographic" => "stere",
        "lambertazimuthalequalarea" => "laea",
        "equirectangular" | "equidistantcylindrical" | "platecarree" => "eqc",
        "sinusoidal" => "sinu",
        _ => return None,
    };
    Some(proj)
}

#[derive(Clone, Copy)]
enum ParamKind { Angle, Length, Scale }

/// Map a projection parameter name onto a PROJ.4 key.
fn parameter_for(name: &str) -> Option<(&'static str, ParamKind)> {
    let param = match name {
        "latitudeoforigin" | "latitudeofnaturalorigin" | "latitudeoffalseorigin" | "latitudeofcenter"
        | "latitudeofcentre" | "latitudeofprojectioncentre" | "centrallatitude" => ("lat_0", ParamKind::Angle),
        "centralmeridian" | "longitudeofnaturalorigin" | "longitudeoffalseorigin" | "longitudeoforigin"
        | "longitudeofcenter" | "longitudeofcentre" | "longitudeofprojectioncentre" => ("lon_0", ParamKind::Angle),
        "scalefactor" | "scalefactoratnaturalorigin" => ("k_0", ParamKind::Scale),
        "falseeasting" | "eastingatfalseorigin" => ("x_0", ParamKind::Length),
        "falsenorthing" | "northingatfalseorigin" => ("y_0", ParamKind::Length),
        "standardparallel1" | "latitudeof1ststandardparallel" | "latitudeoffirststandardparallel" => ("lat_1", ParamKind::Angle),
        "standardparallel2" | "latitudeof2ndstandardparallel" | "latitudeofsecondstandardparallel" => ("lat_2", ParamKind::Angle),
        "latitudeofstandardparallel" | "standardparallel" | "latitudeoftruescale" => ("lat_ts", ParamKind::Angle),
        _ => return None,
    };
    Some(param)
}

fn simplify_name(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase()
}

fn projected(node: &WktNode) -> Result<ProjDefinition, WktError> {
    let base = node.child_any(BASE_GEOGRAPHIC).ok_or_else(|| missing(node, "base geographic CRS"))?;

    // WKT1 keeps PROJECTION/PARAMETER on the CRS; WKT2 nests them in CONVERSION/METHOD.
    let conversion = node.child("CONVERSION").unwrap_or(node);
    let method = conversion.child_any(&["PROJECTION", "METHOD"])
        .and_then(WktNode::name)
        .ok_or_else(|| missing(node, "PROJECTION"))?;
    let proj = projection_for(&simplify_name(method))
        .ok_or_else(|| WktError::UnsupportedProjection(method.to_string()))?;

    let linear = linear_unit(node);
    let angular = angular_unit(base);

    let mut params = Vec::new();
    for parameter in conversion.children("PARAMETER") {
        let name = parameter.name().ok_or_else(|| missing(parameter, "parameter name"))?;
        let value = parameter.number(1).ok_or_else(|| missing(parameter, "parameter value"))?;
        let Some((key, kind)) = parameter_for(&simplify_name(name)) else {
            debug!("ignoring WKT projection parameter {name}={value}");
            continue;
        };
        let value = match kind {
            ParamKind::Angle => to_degrees(value, unit_factor(parameter, &["ANGLEUNIT", "UNIT"]).unwrap_or(angular)),
            ParamKind::Length => value * unit_factor(parameter, &["LENGTHUNIT", "UNIT"]).unwrap_or(linear),
            ParamKind::Scale => value * unit_factor(parameter, &["SCALEUNIT"]).unwrap_or(1.0),
        };
        params.push((key, value));
    }
    let get = |key: &str| params.iter().find(|(k, _)| *k == key).map(|(_, v)| *v);

    let mut definition = match proj {
        "webmerc" | "lcc1sp" | "polar" => ProjDefinition::with_projection(match proj {
            "webmerc" => "merc",
            "lcc1sp" => "lcc",
            _ => "stere",
        }),
        proj => ProjDefinition::with_projection(proj),
    };

    for &(key, value) in &params {
        let key = match (proj, key) {
            // Mercator 2SP names its true-scale latitude as the first standard parallel.
            ("merc", "lat_1") => "lat_ts",
            _ => key,
        };
        definition.set(key, value);
    }

    match proj {
        "lcc1sp" => {
            let lat_0 = get("lat_0").unwrap_or(0.0);
            definition.set("lat_1", lat_0);
        }
        "polar" => {
            // Variant A puts the pole in the latitude of origin; otherwise that latitude is the
            // standard parallel, as GDAL writes it.
            let lat_0 = get("lat_0");
            let lat_ts = get("lat_ts").or(lat_0.filter(|lat| lat.abs() != 90.0));
            let pole = lat_ts.or(lat_0).map_or(90.0, |lat| if lat < 0.0 { -90.0 } else { 90.0 });
            definition.set("lat_0", pole);
            if let Some(lat_ts) = lat_ts { definition.set("lat_ts", lat_ts); }
        }
        _ => {}
    }

    if proj == "webmerc" {
        // Spherical formulas on the semi-major axis of the base datum, no datum shift.
        let a = base.child_any(DATUM)
            .and_then(|datum| datum.child_any(&["SPHEROID", "ELLIPSOID"]))
            .and_then(|spheroid| spheroid.number(1))
            .unwrap_or(6378137.0);
        definition.set("a", a).set("b", a).set("nadgrids", "@null");
    } else {
        geodetic_params(base, &mut definition)?;
    }

    if linear != 1.0 { definition.set("to_meter", linear); } else { definition.set("units", "m"); }
    definition.flag("no_defs");
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::CrsKind;
    use crate::wkt::parser::parse;

    fn convert(wkt: &str) -> Crs {
        to_crs(&parse(wkt).unwrap()).unwrap()
    }

    const WGS84_WKT1: &str = r#"GEOGCS["WGS 84",
        DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563,AUTHORITY["EPSG","7030"]],AUTHORITY["EPSG","6326"]],
        PRIMEM["Greenwich",0,AUTHORITY["EPSG","8901"]],
        UNIT["degree",0.0174532925199433,AUTHORITY["EPSG","9122"]],
        AXIS["Latitude",NORTH],AXIS["Longitude",EAST],
        AUTHORITY["EPSG","4326"]]"#;

    #[test]
    fn wkt1_geographic() {
        let crs = convert(WGS84_WKT1);
        assert_eq!(crs.name(), "WGS 84");
        assert_eq!(crs.kind(), CrsKind::Geographic);
        assert_eq!(crs.identifier(), Some(&Identifier::new("EPSG", "4326")));
        assert_eq!(crs.native_axis_order(), AxisOrder::NorthEast);
        assert_eq!(crs.definition().to_proj_string(), "+proj=longlat +datum=WGS84 +no_defs");
    }

    #[test]
    fn wkt1_without_axes_is_east_first() {
        let crs = convert(r#"GEOGCS["GCS_WGS_1984",DATUM["D_WGS_1984",SPHEROID["WGS_1984",6378137.0,298.257223563]],PRIMEM["Greenwich",0.0],UNIT["Degree",0.0174532925199433]]"#);
        assert_eq!(crs.native_axis_order(), AxisOrder::EastNorth);
        assert_eq!(crs.identifier(), None);
    }

    #[test]
    fn unknown_datum_keeps_ellipsoid_and_shift() {
        let crs = convert(r#"GEOGCS["ED50",DATUM["European_Datum_1950",SPHEROID["International 1924",6378388,297],TOWGS84[-87,-98,-121,0,0,0,0]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]]"#);
        let definition = crs.definition();
        assert_eq!(definition.get("ellps"), Some("intl"));
        assert_eq!(definition.get("towgs84"), Some("-87,-98,-121,0,0,0,0"));
        assert!(!definition.has("datum"));
    }

    #[test]
    fn wkt1_utm() {
        let crs = convert(r#"PROJCS["WGS 84 / UTM zone 33N",
            GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]],
            PROJECTION["Transverse_Mercator"],
            PARAMETER["latitude_of_origin",0],PARAMETER["central_meridian",15],PARAMETER["scale_factor",0.9996],
            PARAMETER["false_easting",500000],PARAMETER["false_northing",0],
            UNIT["metre",1],AXIS["Easting",EAST],AXIS["Northing",NORTH],AUTHORITY["EPSG","32633"]]"#);

        assert_eq!(crs.kind(), CrsKind::Projected);
        assert_eq!(crs.native_axis_order(), AxisOrder::EastNorth);
        assert_eq!(crs.epsg(), Some(32633));

        let utm = ProjDefinition::parse("+proj=utm +zone=33 +datum=WGS84 +units=m +no_defs");
        let tmerc = ProjDefinition::parse("+proj=tmerc +lat_0=0 +lon_0=15 +k_0=0.9996 +x_0=500000 +y_0=0 +datum=WGS84 +units=m");
        assert!(crs.definition().equivalent(&tmerc));
        assert!(!crs.definition().equivalent(&utm));
    }

    #[test]
    fn wkt1_feet_are_converted_to_metres() {
        let crs = convert(r#"PROJCS["NAD83 / feet",
            GEOGCS["NAD83",DATUM["North_American_Datum_1983",SPHEROID["GRS 1980",6378137,298.257222101]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]],
            PROJECTION["Lambert_Conformal_Conic_2SP"],
            PARAMETER["standard_parallel_1",33],PARAMETER["standard_parallel_2",45],
            PARAMETER["latitude_of_origin",39],PARAMETER["central_meridian",-96],
            PARAMETER["false_easting",1000],PARAMETER["false_northing",0],
            UNIT["US survey foot",0.3048006096012192]]"#);

        let definition = crs.definition();
        assert_eq!(definition.projection(), Some("lcc"));
        assert_eq!(definition.get("datum"), Some("NAD83"));
        assert_eq!(definition.get("to_meter"), Some("0.3048006096012192"));
        let x_0 = definition.get("x_0").unwrap().parse::<f64>().unwrap();
        assert!((x_0 - 304.8006096012192).abs() < 1e-9);
    }

    #[test]
    fn wkt2_geographic_with_axis_order() {
        let crs = convert(r#"GEOGCRS["WGS 84",
            ENSEMBLE["World Geodetic System 1984 ensemble",MEMBER["World Geodetic System 1984 (G730)"],
                ELLIPSOID["WGS 84",6378137,298.257223563,LENGTHUNIT["metre",1]],ENSEMBLEACCURACY[2.0]],
            PRIMEM["Greenwich",0,ANGLEUNIT["degree",0.0174532925199433]],
            CS[ellipsoidal,2],
                AXIS["geodetic latitude (Lat)",north,ORDER[1],ANGLEUNIT["degree",0.0174532925199433]],
                AXIS["geodetic longitude (Lon)",east,ORDER[2],ANGLEUNIT["degree",0.0174532925199433]],
            ID["EPSG",4326]]"#);

        assert_eq!(crs.identifier(), Some(&Identifier::new("EPSG", "4326")));
        assert_eq!(crs.native_axis_order(), AxisOrder::NorthEast);
        assert_eq!(crs.definition().get("datum"), Some("WGS84"));
    }

    #[test]
    fn wkt2_order_overrides_position() {
        let crs = convert(r#"GEOGCRS["swapped",DATUM["WGS_1984",ELLIPSOID["WGS 84",6378137,298.257223563]],
            CS[ellipsoidal,2],AXIS["lon",east,ORDER[2]],AXIS["lat",north,ORDER[1]]]"#);
        assert_eq!(crs.native_axis_order(), AxisOrder::NorthEast);
    }

    #[test]
    fn wkt2_projected() {
        let crs = convert(r#"PROJCRS["RGF93 v1 / Lambert-93",
            BASEGEOGCRS["RGF93 v1",DATUM["Reseau Geodesique Francais 1993 v1",ELLIPSOID["GRS 1980",6378137,298.257222101,LENGTHUNIT["metre",1]]],
                PRIMEM["Greenwich",0,ANGLEUNIT["degree",0.0174532925199433]]],
            CONVERSION["Lambert-93",METHOD["Lambert Conic Conformal (2SP)",ID["EPSG",9802]],
                PARAMETER["Latitude of false origin",46.5,ANGLEUNIT["degree",0.0174532925199433]],
                PARAMETER["Longitude of false origin",3,ANGLEUNIT["degree",0.0174532925199433]],
                PARAMETER["Latitude of 1st standard parallel",49,ANGLEUNIT["degree",0.0174532925199433]],
                PARAMETER["Latitude of 2nd standard parallel",44,ANGLEUNIT["degree",0.0174532925199433]],
                PARAMETER["Easting at false origin",700000,LENGTHUNIT["metre",1]],
                PARAMETER["Northing at false origin",6600000,LENGTHUNIT["metre",1]]],
            CS[Cartesian,2],
                AXIS["easting (X)",east,ORDER[1],LENGTHUNIT["metre",1]],
                AXIS["northing (Y)",north,ORDER[2],LENGTHUNIT["metre",1]],
            ID["EPSG",2154]]"#);

        assert_eq!(crs.kind(), CrsKind::Projected);
        assert_eq!(crs.epsg(), Some(2154));
        let expected = ProjDefinition::parse("+proj=lcc +lat_0=46.5 +lon_0=3 +lat_1=49 +lat_2=44 +x_0=700000 +y_0=6600000 +ellps=GRS80 +units=m");
        assert!(crs.definition().equivalent(&expected), "{}", crs.definition());
    }

    #[test]
    fn pseudo_mercator_uses_a_sphere() {
        let crs = convert(r#"PROJCS["WGS 84 / Pseudo-Mercator",
            GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]],
            PROJECTION["Mercator_1SP"],PARAMETER["central_meridian",0],PARAMETER["scale_factor",1],
            PARAMETER["false_easting",0],PARAMETER["false_northing",0],UNIT["metre",1],
            EXTENSION["PROJ4","+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +nadgrids=@null +wktext +no_defs"]]"#);
        // Mercator_1SP on the WGS84 ellipsoid is World Mercator, not Web Mercator.
        assert_eq!(crs.definition().get("datum"), Some("WGS84"));

        let crs = convert(r#"PROJCRS["WGS 84 / Pseudo-Mercator",
            BASEGEOGCRS["WGS 84",DATUM["World Geodetic System 1984",ELLIPSOID["WGS 84",6378137,298.257223563]]],
            CONVERSION["Popular Visualisation Pseudo-Mercator",METHOD["Popular Visualisation Pseudo Mercator"],
                PARAMETER["Latitude of natural origin",0],PARAMETER["Longitude of natural origin",0],
                PARAMETER["False easting",0],PARAMETER["False northing",0]],
            CS[Cartesian,2],AXIS["easting (X)",east],AXIS["northing (Y)",north],LENGTHUNIT["metre",1]]"#);
        let expected = ProjDefinition::parse("+proj=merc +a=6378137 +b=6378137 +lat_ts=0 +lon_0=0 +x_0=0 +y_0=0 +k=1 +units=m +nadgrids=@null +wktext +no_defs");
        assert!(crs.definition().equivalent(&expected), "{}", crs.definition());
    }

    #[test]
    fn polar_stereographic_latitude_of_origin_is_true_scale() {
        let crs = convert(r#"PROJCS["NSIDC",
            GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433]],
            PROJECTION["Polar_Stereographic"],PARAMETER["latitude_of_origin",70],PARAMETER["central_meridian",-45],
            PARAMETER["false_easting",0],PARAMETER["false_northing",0],UNIT["metre",1]]"#);
        let definition = crs.definition();
        assert_eq!(definition.projection(), Some("stere"));
        assert_eq!(definition.get("lat_0"), Some("90"));
        assert_eq!(definition.get("lat_ts"), Some("70"));
    }

    #[test]
    fn compound_crs_uses_horizontal_part() {
        let crs = convert(&format!(r#"COMPD_CS["WGS 84 + height",{WGS84_WKT1},VERT_CS["height",VERT_DATUM["x",2005]]]"#));
        assert_eq!(crs.epsg(), Some(4326));
    }

    #[test]
    fn unsupported_inputs() {
        let err = to_crs(&parse(r#"VERT_CS["height",VERT_DATUM["x",2005]]"#).unwrap()).unwrap_err();
        assert_eq!(err, WktError::UnsupportedElement("VERT_CS".to_string()));

        let err = to_crs(&parse(r#"PROJCS["x",GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]]],PROJECTION["Bonne"]]"#).unwrap()).unwrap_err();
        assert_eq!(err, WktError::UnsupportedProjection("Bonne".to_string()));

        let err = to_crs(&parse(r#"GEOGCS["no datum",UNIT["degree",0.0174532925199433]]"#).unwrap()).unwrap_err();
        assert!(matches!(err, WktError::Missing { .. }));
    }

    #[test]
    fn geographic_crs_must_be_in_degrees() {
        let grads = r#"GEOGCS["WGS 84 (grad)",
            DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],
            PRIMEM["Greenwich",0],
            UNIT["grad",0.0157079632679]]"#;
        let err = to_crs(&parse(grads).unwrap()).unwrap_err();
        assert_eq!(err, WktError::InvalidValue { what: "angular unit".to_string(), value: 0.0157079632679f64.to_string() });
    }
}
