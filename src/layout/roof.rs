use crate::config::LayoutConfig;
use crate::math::triangle::{angle_from_legs, hypotenuse_from_legs, leg_from_hypotenuse};
use crate::math::{approx_eq, Point2};

use super::Layout;

/// Slopes of a gambrel roof, measured on the hip-end profile.
///
/// The upper slope runs from the ridge to the secondary ridge, the lower
/// slope from there to the eave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarnProfile {
    pub upper_run: f64,
    pub upper_drop: f64,
    pub lower_run: f64,
    pub lower_drop: f64,
}

impl BarnProfile {
    #[must_use]
    pub fn upper_length(&self) -> f64 {
        hypotenuse_from_legs(self.upper_drop, self.upper_run)
    }

    #[must_use]
    pub fn lower_length(&self) -> f64 {
        hypotenuse_from_legs(self.lower_drop, self.lower_run)
    }

    /// Pitch of the upper slope in degrees.
    #[must_use]
    pub fn upper_pitch(&self) -> f64 {
        angle_from_legs(self.upper_drop, self.upper_run)
    }

    /// Pitch of the lower slope in degrees.
    #[must_use]
    pub fn lower_pitch(&self) -> f64 {
        angle_from_legs(self.lower_drop, self.lower_run)
    }
}

/// Derived measurements of the roof shared by its pieces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoofProfile {
    pub width: f64,
    pub depth: f64,
    pub peak: f64,
    pub inset: f64,
    /// Pitch of a gable slope in degrees.
    pub pitch: f64,
    /// Length of a gable slope from ridge to eave.
    pub slope_length: f64,
    /// Height of the hip-end triangle.
    pub side_height: f64,
    /// Ridge length.
    pub top_width: f64,
    pub barn: Option<BarnProfile>,
}

impl RoofProfile {
    #[must_use]
    pub fn new(cfg: &LayoutConfig) -> Self {
        let half_depth = cfg.depth / 2.0;
        let slope_length = hypotenuse_from_legs(cfg.peak, half_depth);
        let side_height = if approx_eq(cfg.inset, 0.0) {
            cfg.peak
        } else {
            let hip = hypotenuse_from_legs(slope_length, cfg.inset);
            leg_from_hypotenuse(hip, half_depth)
        };
        let barn = cfg.barn.map(|ratios| {
            let lower_run = ratios.depth * half_depth;
            let upper_drop = ratios.height * cfg.peak;
            BarnProfile {
                upper_run: half_depth - lower_run,
                upper_drop,
                lower_run,
                lower_drop: cfg.peak - upper_drop,
            }
        });
        Self {
            width: cfg.width,
            depth: cfg.depth,
            peak: cfg.peak,
            inset: cfg.inset,
            pitch: angle_from_legs(cfg.peak, half_depth),
            slope_length,
            side_height,
            top_width: cfg.width - 2.0 * cfg.inset,
            barn,
        }
    }

    #[must_use]
    pub fn half_depth(&self) -> f64 {
        self.depth / 2.0
    }

    /// Pitch of the slope a dormer sits in: the lower slope of a gambrel.
    #[must_use]
    pub fn dormer_pitch(&self) -> f64 {
        self.barn.map_or(self.pitch, |b| b.lower_pitch())
    }

    /// Pitch of the slope at the ridge, where the chimney sits.
    #[must_use]
    pub fn chimney_pitch(&self) -> f64 {
        self.barn.map_or(self.pitch, |b| b.upper_pitch())
    }

    /// Rectangular footprint. No tabs or scores.
    #[must_use]
    pub fn base(&self) -> Layout {
        let (w, d) = (self.width, self.depth);
        Layout::new(vec![
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
            Point2::new(w, d),
            Point2::new(0.0, d),
            Point2::new(0.0, 0.0),
        ])
    }

    /// Hip-end piece with its apex at the origin, tabbed on every edge but
    /// the closing one (the caller adds that as a wrap tab).
    #[must_use]
    pub fn side(&self) -> Layout {
        let hd = self.half_depth();
        let origin = Point2::new(0.0, 0.0);
        match self.barn {
            None => Layout {
                tabs: vec![1, 2],
                ..Layout::new(vec![
                    origin,
                    Point2::new(hd, self.side_height),
                    Point2::new(-hd, self.side_height),
                    origin,
                ])
            },
            Some(barn) => Layout {
                tabs: vec![1, 2, 3, 4],
                ..Layout::new(vec![
                    origin,
                    Point2::new(barn.upper_run, barn.upper_drop),
                    Point2::new(hd, self.peak),
                    Point2::new(-hd, self.peak),
                    Point2::new(-barn.upper_run, barn.upper_drop),
                    origin,
                ])
            },
        }
    }

    /// One slope of the roof, ridge at the top.
    ///
    /// A gable slope is a trapezoid tabbed along ridge and eave. A gambrel
    /// slope is a rectangle folded at the secondary ridge, tabbed along the
    /// ridge and the eave.
    #[must_use]
    pub fn main(&self) -> Layout {
        let w = self.width;
        match self.barn {
            None => Layout {
                tabs: vec![1, 3],
                ..Layout::new(vec![
                    Point2::new(self.inset, 0.0),
                    Point2::new(self.inset + self.top_width, 0.0),
                    Point2::new(w, self.slope_length),
                    Point2::new(0.0, self.slope_length),
                    Point2::new(self.inset, 0.0),
                ])
            },
            Some(barn) => {
                let fold = barn.upper_length();
                let total = fold + barn.lower_length();
                Layout {
                    tabs: vec![1, 4],
                    scores: vec![(2, 5)],
                    deco_scores: vec![(2, 5)],
                    ..Layout::new(vec![
                        Point2::new(0.0, 0.0),
                        Point2::new(w, 0.0),
                        Point2::new(w, fold),
                        Point2::new(w, total),
                        Point2::new(0.0, total),
                        Point2::new(0.0, fold),
                        Point2::new(0.0, 0.0),
                    ])
                }
            }
        }
    }
}
