pub mod detection;
pub mod point;
pub mod polygon;

pub use detection::Detection;
pub use point::Point;
pub use polygon::Polygon;
