use thiserror::Error;

/// Errors surfaced by CRS resolution and geometry reprojection.
#[derive(Error, Debug)]
pub enum CrsError {
    #[error("Source CRS must be specified. No SRID found on geometry.")]
    MissingSourceCrs,

    #[error("First failed to read as a well-known CRS code: \n{authority}\nThen failed to read as a WKT CRS string: \n{wkt}")]
    Resolution { authority: String, wkt: String },

    #[error("failed to create CRS from '{input}': {reason}")]
    Factory { input: String, reason: String },

    #[error("Cannot decode SRID {srid}: {reason}")]
    InvalidSrid { srid: i32, reason: String },

    #[error("no transform path from '{from}' to '{to}': {reason}")]
    NoTransformPath { from: String, to: String, reason: String },

    #[error("failed to transform coordinate ({x}, {y}): {reason}")]
    CoordinateTransform { x: f64, y: f64, reason: String },
}

/// Failure of an authority:code lookup.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LookupError {
    /// The string is not an authority reference, or the code is unknown.
    #[error("No code \"{code}\" from authority \"{authority}\" found for object of type \"CoordinateReferenceSystem\"")]
    NoSuchAuthorityCode { authority: String, code: String },

    #[error("'{0}' is not an authority:code reference")]
    NotAnIdentifier(String),

    /// The code is known but its definition could not be instantiated.
    #[error("{0}")]
    Factory(String),
}

impl LookupError {
    /// Whether the resolver may fall back to reading the input as WKT.
    pub fn is_unknown_code(&self) -> bool {
        matches!(self, Self::NoSuchAuthorityCode { .. } | Self::NotAnIdentifier(_))
    }
}

/// Failure while reading WKT text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WktError {
    #[error("unexpected end of WKT text, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unterminated quoted string starting at offset {0}")]
    UnterminatedString(usize),

    #[error("trailing characters after WKT element at offset {0}")]
    TrailingCharacters(usize),

    #[error("WKT elements nested too deeply at offset {0}")]
    TooDeep(usize),

    #[error("unsupported WKT element \"{0}\"")]
    UnsupportedElement(String),

    #[error("missing {what} in {element}")]
    Missing { element: String, what: String },

    #[error("unsupported projection method \"{0}\"")]
    UnsupportedProjection(String),

    #[error("invalid value for {what}: {value}")]
    InvalidValue { what: String, value: String },
}

pub type Result<T> = std::result::Result<T, CrsError>;
