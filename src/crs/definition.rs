use std::{collections::BTreeMap, fmt};

use crate::crs::datum;

/// Parameters that carry no geodetic meaning and are dropped before comparing definitions.
const METADATA_KEYS: &[&str] = &["no_defs", "type", "wktext", "title", "init", "axis"];

/// A PROJ.4 definition: an ordered list of `+key[=value]` parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjDefinition {
    params: Vec<(String, Option<String>)>,
}

impl ProjDefinition {
    /// Parse a PROJ.4 string such as `+proj=longlat +datum=WGS84 +no_defs`.
    /// The leading `+` is optional on every token.
    pub fn parse(text: &str) -> Self {
        let params = text.split_whitespace()
            .map(|token| token.trim_start_matches('+'))
            .filter(|token| !token.is_empty())
            .map(|token| match token.split_once('=') {
                Some((key, value)) => (key.to_string(), Some(value.to_string())),
                None => (token.to_string(), None),
            })
            .collect();
        Self { params }
    }

    /// Start a definition with the given `+proj=` value.
    pub fn with_projection(projection: &str) -> Self {
        Self { params: vec![("proj".to_string(), Some(projection.to_string()))] }
    }

    /// Append or replace a valued parameter.
    pub fn set(&mut self, key: &str, value: impl ToString) -> &mut Self {
        let value = Some(value.to_string());
        match self.params.iter_mut().find(|(k, _)| k == key) {
            Some(param) => param.1 = value,
            None => self.params.push((key.to_string(), value)),
        }
        self
    }

    /// Append a flag parameter (no value), e.g. `+south`.
    pub fn flag(&mut self, key: &str) -> &mut Self {
        if !self.has(key) { self.params.push((key.to_string(), None)) }
        self
    }

    /// Remove a parameter, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let len = self.params.len();
        self.params.retain(|(k, _)| k != key);
        self.params.len() != len
    }

    #[inline] pub fn has(&self, key: &str) -> bool { self.params.iter().any(|(k, _)| k == key) }

    /// Get the value of a parameter; flags yield `None`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    #[inline] pub fn projection(&self) -> Option<&str> { self.get("proj") }

    /// Whether the definition describes a geographic (angular) CRS.
    pub fn is_latlong(&self) -> bool {
        matches!(self.projection(), Some("longlat" | "latlong" | "lonlat" | "latlon"))
    }

    #[inline] pub fn is_geocentric(&self) -> bool { self.projection() == Some("geocent") }

    /// Render back to a PROJ.4 string.
    pub fn to_proj_string(&self) -> String {
        self.params.iter()
            .map(|(k, v)| match v {
                Some(v) => format!("+{k}={v}"),
                None => format!("+{k}"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Whether the definition carries datum-shift parameters the CRS library can apply.
    /// Grid shifts other than `@null` are not available.
    pub fn has_datum_shift(&self) -> bool {
        let expanded = self.expand_datum();
        if expanded.has("towgs84") { return true }
        matches!(expanded.get("nadgrids"), Some("@null"))
    }

    /// A copy with the datum reduced to its ellipsoid, i.e. without any datum shift.
    pub fn without_datum_shift(&self) -> Self {
        let mut expanded = self.expand_datum();
        expanded.remove("towgs84");
        expanded.remove("nadgrids");
        expanded
    }

    /// Replace `+datum=` shorthands by the ellipsoid and shift parameters they stand for.
    fn expand_datum(&self) -> Self {
        let Some(def) = self.get("datum").and_then(datum::datum) else { return self.clone() };

        let mut expanded = self.clone();
        expanded.remove("datum");
        if !expanded.has("ellps") && !expanded.has("a") { expanded.set("ellps", def.ellps); }
        if let Some(towgs84) = def.towgs84 {
            if !expanded.has("towgs84") { expanded.set("towgs84", towgs84); }
        }
        if let Some(nadgrids) = def.nadgrids {
            if !expanded.has("nadgrids") { expanded.set("nadgrids", nadgrids); }
        }
        expanded
    }

    /// The geodetic datum of this definition, in a form comparable across spellings.
    pub(crate) fn datum_key(&self) -> Canonical {
        let canonical = self.canonical();
        let params = canonical.params.into_iter()
            .filter(|(k, _)| matches!(k.as_str(), "a" | "rf" | "towgs84" | "nadgrids" | "pm"))
            .collect();
        Canonical { params }
    }

    /// Normalize to a parameter map: datum shorthands expanded, ellipsoids reduced to
    /// `a`/`rf`, default-valued and metadata parameters removed.
    pub(crate) fn canonical(&self) -> Canonical {
        let expanded = self.expand_datum();
        let latlong = expanded.is_latlong();
        let mut params = BTreeMap::new();

        for (key, value) in &expanded.params {
            let key = if key == "k" { "k_0" } else { key.as_str() };
            if METADATA_KEYS.contains(&key) { continue }
            match (key, value.as_deref()) {
                ("proj", Some(p)) => {
                    let p = if matches!(p, "latlong" | "lonlat" | "latlon") { "longlat" } else { p };
                    params.insert("proj".to_string(), CanonicalValue::Text(p.to_string()));
                }
                ("ellps", Some(id)) => match datum::ellipsoid(id) {
                    Some(e) => {
                        params.insert("a".to_string(), CanonicalValue::Numbers(vec![e.a]));
                        params.insert("rf".to_string(), CanonicalValue::Numbers(vec![e.rf]));
                    }
                    None => { params.insert("ellps".to_string(), CanonicalValue::Text(id.to_string())); }
                },
                ("R", Some(r)) => {
                    params.insert("a".to_string(), CanonicalValue::parse(r));
                    params.insert("rf".to_string(), CanonicalValue::Numbers(vec![0.0]));
                }
                ("b", Some(b)) => {
                    let a = expanded.get("a").and_then(|a| a.parse::<f64>().ok());
                    let b = b.parse::<f64>().ok();
                    if let (Some(a), Some(b)) = (a, b) {
                        let rf = if (a - b).abs() < f64::EPSILON { 0.0 } else { a / (a - b) };
                        params.insert("rf".to_string(), CanonicalValue::Numbers(vec![rf]));
                    }
                }
                ("f", Some(f)) => {
                    if let Ok(f) = f.parse::<f64>() {
                        let rf = if f == 0.0 { 0.0 } else { 1.0 / f };
                        params.insert("rf".to_string(), CanonicalValue::Numbers(vec![rf]));
                    }
                }
                ("towgs84", Some(v)) => {
                    let mut shift = CanonicalValue::parse(v);
                    if let CanonicalValue::Numbers(values) = &mut shift { values.resize(7, 0.0) }
                    params.insert("towgs84".to_string(), shift);
                }
                ("pm", Some(pm)) => {
                    let pm = if pm.eq_ignore_ascii_case("greenwich") { "0" } else { pm };
                    params.insert("pm".to_string(), CanonicalValue::parse(pm));
                }
                ("units" | "to_meter", _) if latlong => {}
                (key, Some(v)) => { params.insert(key.to_string(), CanonicalValue::parse(v)); }
                (key, None) => { params.insert(key.to_string(), CanonicalValue::Flag); }
            }
        }

        // Parameters whose value equals the PROJ default do not distinguish definitions.
        params.retain(|key, value| !is_default(key, value));
        Canonical { params }
    }

    /// Compare two definitions for geodetic equivalence, ignoring metadata and spelling.
    pub fn equivalent(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

fn is_default(key: &str, value: &CanonicalValue) -> bool {
    let zero = CanonicalValue::Numbers(vec![0.0]);
    match key {
        "x_0" | "y_0" | "lat_0" | "lon_0" | "lat_ts" | "pm" => *value == zero,
        "k_0" => *value == CanonicalValue::Numbers(vec![1.0]),
        "units" => *value == CanonicalValue::Text("m".to_string()),
        "towgs84" => *value == CanonicalValue::Numbers(vec![0.0; 7]),
        _ => false,
    }
}

impl fmt::Display for ProjDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_proj_string())
    }
}

impl From<&str> for ProjDefinition {
    fn from(text: &str) -> Self { Self::parse(text) }
}

#[derive(Debug, Clone)]
pub(crate) enum CanonicalValue {
    Flag,
    Numbers(Vec<f64>),
    Text(String),
}

impl CanonicalValue {
    fn parse(value: &str) -> Self {
        let numbers = value.split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>();
        match numbers {
            Ok(numbers) => Self::Numbers(numbers),
            Err(_) => Self::Text(value.to_string()),
        }
    }
}

impl PartialEq for CanonicalValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Flag, Self::Flag) => true,
            (Self::Text(a), Self::Text(b)) => a.eq_ignore_ascii_case(b),
            (Self::Numbers(a), Self::Numbers(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| {
                    (x - y).abs() <= 1e-9 + 1e-12 * x.abs().max(y.abs())
                })
            }
            _ => false,
        }
    }
}

/// A canonical parameter map, see [`ProjDefinition::canonical`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Canonical {
    params: BTreeMap<String, CanonicalValue>,
}
