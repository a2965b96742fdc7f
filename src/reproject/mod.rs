mod reproject;

pub use reproject::Reprojector;
