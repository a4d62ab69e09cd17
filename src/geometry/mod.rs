pub mod ellipse;
pub mod path;

pub use ellipse::Ellipse;
pub use path::{Path, PathCommand};
