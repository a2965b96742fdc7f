mod convert;
mod parser;

use crate::crs::Crs;
use crate::error::WktError;

/// Read a WKT1 or WKT2 CRS description. The result keeps the axis order the text declares.
pub fn parse_wkt(text: &str) -> Result<Crs, WktError> {
    let node = parser::parse(text)?;
    convert::to_crs(&node)
}
