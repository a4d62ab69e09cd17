pub mod assemble;
pub mod offset;
pub mod score;
pub mod tab;

pub use assemble::{AssemblePiece, Cutout, Grouping, Piece, PieceRole, ScorePair};
pub use offset::{inset_corner, InsetPolygon};
pub use score::{ScoreLine, ScoreSpec};
pub use tab::{Backoff, EdgeClass, Orientation, Side, TabResolver, TabSpec};
