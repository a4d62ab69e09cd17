//! Parametric outline builders for every piece of the model.
//!
//! Each builder returns plain point lists plus the index maps the assembler
//! consumes. All coordinates are in document units with `y` pointing down.

pub mod chimney;
pub mod dormer;
pub mod roof;

use crate::math::Point2;
use crate::operations::ScorePair;

pub use chimney::ChimneyLayout;
pub use dormer::DormerLayout;
pub use roof::{BarnProfile, RoofProfile};

/// Outline of one piece with its tab and score maps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    pub outline: Vec<Point2>,
    /// Vertices that get a tab on the edge arriving at them.
    pub tabs: Vec<usize>,
    pub scores: Vec<ScorePair>,
    /// Score lines drawn on the decorative copy of the piece.
    pub deco_scores: Vec<ScorePair>,
}

impl Layout {
    #[must_use]
    pub fn new(outline: Vec<Point2>) -> Self {
        Self {
            outline,
            ..Self::default()
        }
    }
}
