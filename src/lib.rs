//! Geometry engine for papercraft roof dielines.
//!
//! Options go in through [`config::RoofOptions`]; [`generate::RoofMaker`]
//! lays out every piece of the roof, its dormer and chimney, and returns
//! them as [`operations::Piece`]s whose paths print as SVG path data.

pub mod config;
pub mod error;
pub mod generate;
pub mod geometry;
pub mod layout;
pub mod math;
pub mod operations;

pub use config::{RoofOptions, ScoreStyle, Unit};
pub use error::{ConfigError, GeometryError, Result, RoofError};
pub use generate::RoofMaker;
pub use operations::{Grouping, Piece, PieceRole};
