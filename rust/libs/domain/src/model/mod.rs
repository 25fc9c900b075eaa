mod destination;
mod image_spec;
mod outcome;
mod point;

pub use destination::*;
pub use image_spec::*;
pub use outcome::*;
pub use point::*;
