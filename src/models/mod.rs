pub mod geometry;
pub mod statistics;

pub use geometry::*;
pub use statistics::*;
