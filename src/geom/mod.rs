mod envelope;
mod geom;

pub use envelope::ReferencedEnvelope;
pub use geom::SridGeometry;
