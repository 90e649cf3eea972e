pub mod error;
pub mod radial;

pub use radial::{MarkerPlacement, RadialLayout};
