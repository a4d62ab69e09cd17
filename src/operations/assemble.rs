use tracing::{debug, warn};

use crate::error::{GeometryError, Result};
use crate::geometry::Path;
use crate::math::polygon_2d::{dedup_consecutive, strip_closing_point};
use crate::math::{approx_eq, Point2};
use crate::operations::offset::InsetPolygon;
use crate::operations::score::{ScoreLine, ScoreSpec};
use crate::operations::tab::{TabResolver, TabSpec};

/// Stroke colour of score lines drawn as their own path.
pub const SCORE_STROKE: &str = "#009900";

/// A score line between two outline vertices, by index.
pub type ScorePair = (usize, usize);

/// What a piece is used for once cut out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceRole {
    /// Carries the tabs the model is glued together with.
    Structural,
    /// Glued over a structural piece to hide its tabs.
    Decorative,
    /// Template for an opening cut into another piece.
    Hole,
}

impl PieceRole {
    /// Fill colour used when the piece is drawn.
    #[must_use]
    pub fn fill(self) -> &'static str {
        match self {
            Self::Structural => "#ffd5d5",
            Self::Decorative => "#80e5ff",
            Self::Hole => "#aaaaaa",
        }
    }
}

/// How boundary and score lines are meant to be emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Boundary and scores as two paths in one group.
    Separate,
    /// Scores appended to the boundary as a single path.
    Combined,
}

/// An opening cut out of a piece, offset from its own outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Cutout {
    pub outline: Vec<Point2>,
    /// Inset distance; negative values outset a clockwise outline.
    pub distance: f64,
    /// Emit only the opening, without the piece boundary.
    pub only: bool,
}

impl Cutout {
    #[must_use]
    pub fn new(outline: Vec<Point2>, distance: f64) -> Self {
        Self {
            outline,
            distance,
            only: false,
        }
    }

    #[must_use]
    pub fn only(mut self) -> Self {
        self.only = true;
        self
    }
}

/// One finished piece of the dieline.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub name: String,
    pub role: PieceRole,
    /// Outline with tabs, followed by the cutout sub-path if any.
    pub boundary: Path,
    pub scores: Path,
    pub grouping: Grouping,
}

impl Piece {
    /// Boundary and scores as one path.
    #[must_use]
    pub fn combined_path(&self) -> Path {
        let mut path = self.boundary.clone();
        path.append(self.scores.clone());
        path
    }
}

/// Turns an outline plus its tab and score maps into a [`Piece`].
///
/// A tab index `i` places a tab on the edge from vertex `i - 1` to vertex `i`
/// and draws a score along that edge. Indices refer to the outline after a
/// repeated closing point has been dropped.
#[derive(Debug)]
pub struct AssemblePiece {
    name: String,
    role: PieceRole,
    outline: Vec<Point2>,
    tabs: Vec<usize>,
    scores: Vec<ScorePair>,
    wrap_tab: bool,
    enclosed: bool,
    cutout: Option<Cutout>,
    tab: TabSpec,
    score: ScoreSpec,
    combine: bool,
}

impl AssemblePiece {
    /// Creates an assembly of `outline` with no tabs, scores or cutout.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        role: PieceRole,
        outline: Vec<Point2>,
        tab: TabSpec,
        score: ScoreSpec,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            outline,
            tabs: Vec::new(),
            scores: Vec::new(),
            wrap_tab: false,
            enclosed: false,
            cutout: None,
            tab,
            score,
            combine: true,
        }
    }

    #[must_use]
    pub fn tabs(mut self, tabs: Vec<usize>) -> Self {
        self.tabs = tabs;
        self
    }

    #[must_use]
    pub fn scores(mut self, scores: Vec<ScorePair>) -> Self {
        self.scores = scores;
        self
    }

    /// Adds a tab on the closing edge from the last vertex to the first.
    #[must_use]
    pub fn wrap_tab(mut self, wrap_tab: bool) -> Self {
        self.wrap_tab = wrap_tab;
        self
    }

    /// Marks the outline as bounding a hole, so tabs go inside it.
    #[must_use]
    pub fn enclosed(mut self, enclosed: bool) -> Self {
        self.enclosed = enclosed;
        self
    }

    /// A cutout with zero distance is ignored.
    #[must_use]
    pub fn cutout(mut self, cutout: Cutout) -> Self {
        self.cutout = Some(cutout);
        self
    }

    /// Replaces the tab shape given at construction.
    #[must_use]
    pub fn with_tab(mut self, tab: TabSpec) -> Self {
        self.tab = tab;
        self
    }

    #[must_use]
    pub fn with_score(mut self, score: ScoreSpec) -> Self {
        self.score = score;
        self
    }

    #[must_use]
    pub fn combine(mut self, combine: bool) -> Self {
        self.combine = combine;
        self
    }

    /// Assembles the piece.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::TooFewPoints` if the outline has fewer than
    /// three distinct points.
    pub fn execute(self) -> Result<Piece> {
        let mut outline = self.outline;
        let distinct = dedup_consecutive(&outline).len();
        if distinct < 3 {
            return Err(GeometryError::TooFewPoints(distinct).into());
        }
        strip_closing_point(&mut outline);

        let resolver = TabResolver::new(&outline, self.enclosed);
        let mut boundary = Path::new();
        let mut scores = Path::new();

        for &i in &self.tabs {
            if i == 0 || i >= outline.len() {
                warn!(piece = %self.name, index = i, "tab index has no edge");
            }
        }

        boundary.move_to(outline[0]);
        for i in 1..outline.len() {
            let (prev, cur) = (outline[i - 1], outline[i]);
            if self.tabs.contains(&i) {
                let (near_cur, near_prev) = resolver.resolve(&cur, &prev, &self.tab);
                scores.append(ScoreLine::new(cur, prev, self.score).build());
                boundary.line_to(near_prev);
                boundary.line_to(near_cur);
            }
            boundary.line_to(cur);
        }
        if self.wrap_tab {
            let (first, last) = (outline[0], outline[outline.len() - 1]);
            let (near_first, near_last) = resolver.resolve(&first, &last, &self.tab);
            let fold = ScoreLine::new(first, last, self.score);
            scores.append(fold.build());
            boundary.line_to(near_last);
            boundary.line_to(near_first);
        }
        boundary.close();

        for &(a, b) in &self.scores {
            if let (Some(pa), Some(pb)) = (outline.get(a), outline.get(b)) {
                scores.append(ScoreLine::new(*pa, *pb, self.score).build());
            } else {
                warn!(piece = %self.name, a, b, "score pair references a missing vertex");
            }
        }

        if let Some(cutout) = self.cutout.filter(|c| !approx_eq(c.distance, 0.0)) {
            let opening = inset_opening(&cutout.outline, cutout.distance);
            if cutout.only {
                boundary = opening;
            } else {
                boundary.append(opening);
            }
        }

        let grouping = if self.score.is_solid() || !self.combine {
            Grouping::Separate
        } else {
            Grouping::Combined
        };

        debug!(
            piece = %self.name,
            commands = boundary.len(),
            scores = scores.subpath_count(),
            ?grouping,
            "assembled piece"
        );

        Ok(Piece {
            name: self.name,
            role: self.role,
            boundary,
            scores,
            grouping,
        })
    }
}

/// Insets `outline` and returns it as a closed sub-path in reversed order.
fn inset_opening(outline: &[Point2], distance: f64) -> Path {
    let mut corners = dedup_consecutive(outline);
    InsetPolygon::new(&mut corners, distance).execute();

    let mut path = Path::new();
    let Some((first, rest)) = corners.split_first() else {
        return path;
    };
    path.move_to(*first);
    for p in rest.iter().rev() {
        path.line_to(*p);
    }
    path.close();
    path
}
