use std::fmt;

use crate::math::Point2;

/// One drawing command of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    /// Starts a new sub-path at the point.
    MoveTo(Point2),
    /// Straight line from the current point.
    LineTo(Point2),
    /// Closes the current sub-path back to its start.
    Close,
}

impl PathCommand {
    /// Returns the point carried by a move or line command.
    #[must_use]
    pub fn point(&self) -> Option<Point2> {
        match self {
            Self::MoveTo(p) | Self::LineTo(p) => Some(*p),
            Self::Close => None,
        }
    }
}

/// An ordered list of move / line / close commands.
///
/// Boundaries are closed sub-paths; score lines are open `MoveTo`/`LineTo`
/// pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    /// Creates an empty path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a closed sub-path through `points`.
    #[must_use]
    pub fn closed_polygon(points: &[Point2]) -> Self {
        let mut path = Self::new();
        for (i, p) in points.iter().enumerate() {
            if i == 0 {
                path.move_to(*p);
            } else {
                path.line_to(*p);
            }
        }
        if !points.is_empty() {
            path.close();
        }
        path
    }

    pub fn move_to(&mut self, p: Point2) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point2) {
        self.commands.push(PathCommand::LineTo(p));
    }

    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Appends all commands of `other`.
    pub fn append(&mut self, other: Path) {
        self.commands.extend(other.commands);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns the number of sub-paths (one per `MoveTo`).
    #[must_use]
    pub fn subpath_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count()
    }

    /// Returns the points of every move and line command, in order.
    #[must_use]
    pub fn points(&self) -> Vec<Point2> {
        self.commands
            .iter()
            .filter_map(PathCommand::point)
            .collect()
    }

    /// Splits the path into the point lists of its sub-paths.
    #[must_use]
    pub fn subpaths(&self) -> Vec<Vec<Point2>> {
        let mut out: Vec<Vec<Point2>> = Vec::new();
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(p) => out.push(vec![*p]),
                PathCommand::LineTo(p) => match out.last_mut() {
                    Some(current) => current.push(*p),
                    None => out.push(vec![*p]),
                },
                PathCommand::Close => {}
            }
        }
        out
    }
}

/// Formats as SVG path data (`M x,y L x,y ... Z`).
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match cmd {
                PathCommand::MoveTo(p) => write!(f, "M {},{}", round4(p.x), round4(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L {},{}", round4(p.x), round4(p.y))?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

fn round4(v: f64) -> f64 {
    let r = (v * 10_000.0).round() / 10_000.0;
    // Avoid printing "-0".
    if r == 0.0 {
        0.0
    } else {
        r
    }
}
