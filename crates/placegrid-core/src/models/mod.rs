//! Domain models shared across all placegrid crates.

pub mod coordinate;
pub mod place;
pub mod profile;

pub use coordinate::{meters_to_degrees, BoundingBox, Coordinate, METERS_PER_DEGREE};
pub use place::PlaceRecord;
pub use profile::{PointOrigin, SearchPoint, SearchProfile};
