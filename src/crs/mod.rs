mod crs;
pub(crate) mod datum;
mod definition;
mod provider;
mod registry;
mod resolve;

pub use crs::{AxisOrder, Crs, CrsKind, Identifier};
pub use definition::ProjDefinition;
pub use provider::{CrsProvider, MathTransform, Proj4Provider};
pub use registry::{parse_identifier, AuthorityEntry, AuthorityRegistry};
pub use resolve::CrsResolver;
