mod inset_polygon;

pub use inset_polygon::{inset_corner, InsetPolygon};
